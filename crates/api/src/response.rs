use serde::{Deserialize, Serialize};

/// Standard `{ "data": ... }` envelope for successful API responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
