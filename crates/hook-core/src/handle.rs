//! Canal de reporte de fallos de una prueba.
//!
//! El engine reporta fallos de hooks a través de este trait y los steps de
//! las features lo usan para señalar sus propios fallos. El engine nunca
//! inspecciona lo que un step reporta.

/// Manejador de la prueba en curso.
pub trait TestHandle {
    fn name(&self) -> &str;

    /// Mensaje informativo.
    fn log(&mut self, message: &str);

    /// Marca la prueba como fallida y continúa.
    fn error(&mut self, message: &str);

    /// Marca la prueba como fallida de forma fatal.
    fn fatal(&mut self, message: &str);

    fn failed(&self) -> bool;
}

/// Implementación en memoria que sólo registra lo reportado.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    name: String,
    logs: Vec<String>,
    errors: Vec<String>,
    fatals: Vec<String>,
}

impl Recorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               ..Self::default() }
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn fatals(&self) -> &[String] {
        &self.fatals
    }

    pub fn is_fatal(&self) -> bool {
        !self.fatals.is_empty()
    }
}

impl TestHandle for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&mut self, message: &str) {
        self.logs.push(message.to_string());
    }

    fn error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn fatal(&mut self, message: &str) {
        self.fatals.push(message.to_string());
    }

    fn failed(&self) -> bool {
        !self.errors.is_empty() || !self.fatals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_tracks_failures_separately() {
        let mut t = Recorder::new("suite");
        assert_eq!(t.name(), "suite");
        t.log("hello");
        assert!(!t.failed());
        t.error("soft");
        assert!(t.failed());
        assert!(!t.is_fatal());
        t.fatal("hard");
        assert!(t.is_fatal());
        assert_eq!(t.logs(), ["hello"]);
        assert_eq!(t.errors(), ["soft"]);
        assert_eq!(t.fatals(), ["hard"]);
    }
}
