pub mod classification;
pub mod confusion_matrix;
pub mod group;
pub mod id_group;
pub mod observation;
