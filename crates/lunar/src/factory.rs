use crate::{AstronomicalClassifier, ConwayClassifier, PhaseClassifier};
use core_types::ClassifierId;

/// Creates the classifier identified by `id`.
pub fn create_classifier(id: ClassifierId) -> Box<dyn PhaseClassifier> {
    match id {
        ClassifierId::Astronomical => Box::new(AstronomicalClassifier::new()),
        ClassifierId::Conway => Box::new(ConwayClassifier::new()),
    }
}
