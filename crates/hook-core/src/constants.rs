//! Constantes del motor core.
//!
//! `ENGINE_VERSION` forma parte del input del fingerprint de cada feature: un
//! cambio de versión invalida los fingerprints aunque la feature no cambie.

/// Versión lógica del motor. Mantener estable mientras no haya cambios
/// incompatibles en el orden de ejecución.
pub const ENGINE_VERSION: &str = "H1.0";

/// Nombre por defecto de los steps de nivel `Setup` de una feature.
pub const FEATURE_SETUP_STEP: &str = "setup";

/// Nombre por defecto de los steps de nivel `Teardown` de una feature.
pub const FEATURE_TEARDOWN_STEP: &str = "teardown";
