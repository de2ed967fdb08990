mod api;

pub use api::{
    ApiResponse, AuthInfo, FeatureFlags, HealthData, InfoData, StatusData, WhoamiData,
};
