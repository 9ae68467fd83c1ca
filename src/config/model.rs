use crate::festivales::model::Mes;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug)]
pub struct Config {
    pub festivales_file: PathBuf,
    pub cancel_config: Option<CancelConfig>,
    pub output_json: bool,
}

/// Venues to cancel festivals at, in a single month
#[derive(Debug, PartialEq, Eq)]
pub struct CancelConfig {
    pub venues: HashSet<String>,
    pub month: Mes,
}
