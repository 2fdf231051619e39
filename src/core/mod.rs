pub mod config;
pub mod models;

pub use config::AppConfig;
pub use models::{
    KeyPoints, KeyPointsMetadata, LengthClass, Mode, ProviderKind, Style, Summary,
    SummaryMetadata, SummaryOptions, SummaryResponse,
};
