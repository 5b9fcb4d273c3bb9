//! Etiquetas clave/valor compartidas por features y por el selector de la
//! configuración. Se preserva el orden de inserción.

use indexmap::IndexMap;

use crate::error::ConfigError;

/// Mapa ordenado `clave -> valor`.
pub type Labels = IndexMap<String, String>;

/// Parsea una lista `k=v,k2=v2` (espacios alrededor ignorados).
///
/// Una cadena vacía produce un mapa vacío. Claves repetidas: gana la última.
pub fn parse_labels(raw: &str) -> Result<Labels, ConfigError> {
    let mut labels = Labels::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=')
                               .ok_or_else(|| ConfigError::InvalidLabel(pair.to_string()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidLabel(pair.to_string()));
        }
        labels.insert(key.to_string(), value.trim().to_string());
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_in_order() {
        let labels = parse_labels("type=k8s, tier = fast").unwrap();
        let keys: Vec<&str> = labels.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["type", "tier"]);
        assert_eq!(labels["tier"], "fast");
    }

    #[test]
    fn empty_input_is_empty_selector() {
        assert!(parse_labels("").unwrap().is_empty());
        assert!(parse_labels(" , ").unwrap().is_empty());
    }

    #[test]
    fn rejects_missing_separator_and_empty_key() {
        assert_eq!(parse_labels("novalue").unwrap_err(), ConfigError::InvalidLabel("novalue".into()));
        assert!(parse_labels("=x").is_err());
    }

    #[test]
    fn value_may_be_empty() {
        let labels = parse_labels("flag=").unwrap();
        assert_eq!(labels["flag"], "");
    }
}
