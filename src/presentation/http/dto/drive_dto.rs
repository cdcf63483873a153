use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DriveListQueryDto {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page_size() -> u32 {
    100
}
