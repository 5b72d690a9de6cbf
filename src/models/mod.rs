pub mod annotation;
pub mod note;

pub use annotation::{AnnotatedNote, HousingAnnotation, RawAnnotation, StabilityStatus, YesNo};
pub use note::PatientNote;
