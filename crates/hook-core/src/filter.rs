//! Filtro de features y assessments.
//!
//! Semántica de los patrones: búsqueda no anclada (`Regex::is_match`). Sin
//! patrón configurado todo coincide. Un patrón de exclusión gana siempre sobre
//! el de inclusión. El selector de etiquetas exige que cada par configurado
//! esté presente con el mismo valor en la feature.

use hookflow_conf::{Config, Labels};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::feature::Feature;

/// Motivo por el que una feature queda (o no) seleccionada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Selection {
    Selected,
    NameNotMatched,
    NameExcluded,
    LabelsNotMatched,
}

impl Selection {
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Filter {
    feature: Option<Regex>,
    assessment: Option<Regex>,
    skip_feature: Option<Regex>,
    skip_assessment: Option<Regex>,
    labels: Labels,
}

impl Filter {
    pub fn from_config(cfg: &Config) -> Self {
        Self { feature: cfg.feature_regex().cloned(),
               assessment: cfg.assessment_regex().cloned(),
               skip_feature: cfg.skip_feature_regex().cloned(),
               skip_assessment: cfg.skip_assessment_regex().cloned(),
               labels: cfg.labels().clone() }
    }

    fn included(include: Option<&Regex>, name: &str) -> bool {
        include.map_or(true, |re| re.is_match(name))
    }

    fn excluded(exclude: Option<&Regex>, name: &str) -> bool {
        exclude.is_some_and(|re| re.is_match(name))
    }

    fn check(include: Option<&Regex>, exclude: Option<&Regex>, name: &str) -> bool {
        Self::included(include, name) && !Self::excluded(exclude, name)
    }

    pub fn matches_feature(&self, name: &str) -> bool {
        Self::check(self.feature.as_ref(), self.skip_feature.as_ref(), name)
    }

    pub fn matches_assessment(&self, name: &str) -> bool {
        Self::check(self.assessment.as_ref(), self.skip_assessment.as_ref(), name)
    }

    pub fn matches_labels(&self, labels: &Labels) -> bool {
        self.labels.iter().all(|(k, v)| labels.get(k) == Some(v))
    }

    pub fn selects<S>(&self, feature: &Feature<S>) -> Selection {
        let name = feature.name();
        if !Self::included(self.feature.as_ref(), name) {
            Selection::NameNotMatched
        } else if Self::excluded(self.skip_feature.as_ref(), name) {
            Selection::NameExcluded
        } else if !self.matches_labels(feature.labels()) {
            Selection::LabelsNotMatched
        } else {
            Selection::Selected
        }
    }
}
