use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use crate::coords::GeodeticPosition;
use crate::predict::{SampleInstant, TrailingWindow, VisibilityReport, VisibilityWindow, WindowClosure};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::look::look_angle,
        super::api::windows::visibility_windows,
    ),
    components(
        schemas(
            SampleInstant,
            VisibilityWindow,
            VisibilityReport,
            WindowClosure,
            TrailingWindow,
            GeodeticPosition,
            ErrorResponse,
        )
    ),
    info(
        title = "Sat-Lookout API",
        description = "Look angles and visibility windows of one satellite from a ground site",
        version = "0.1.0"
    ),
    tags(
        (name = "tracking", description = "Look angles and passes")
    )
)]
pub struct ApiDoc;
