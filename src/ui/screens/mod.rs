pub(crate) mod dashboard;
pub(crate) mod probe;
pub(crate) mod upload;
