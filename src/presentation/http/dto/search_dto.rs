use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct DocumentSearchDto {
    pub content: String,
    #[serde(default = "default_num_docs")]
    pub num_docs: u32,
}

fn default_num_docs() -> u32 {
    4
}
