use serde::Serialize;

/// Envelope for every JSON response:
///
/// ```json
/// {
///   "success": true,
///   "data": { "id": 3, "name": "Data Structures" },
///   "message": "Course created successfully"
/// }
/// ```
///
/// Errors carry the default value of `T` as `data` and a readable message:
///
/// ```json
/// { "success": false, "data": null, "message": "Course not found" }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Error response with default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}
