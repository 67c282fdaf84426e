// Wake models

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StatusDto {
    status: String,
}

impl StatusDto {
    const UP: &str = "UP!";

    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }

    pub fn up() -> Self {
        Self::new(Self::UP)
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_serializes_to_the_wake_payload() {
        let body = serde_json::to_string(&StatusDto::up()).unwrap();

        assert_eq!(body, r#"{"status":"UP!"}"#);
    }

    #[test]
    fn payload_deserializes_back() {
        let status: StatusDto = serde_json::from_str(r#"{"status":"UP!"}"#).unwrap();

        assert_eq!(status.status(), "UP!");
        assert_eq!(status, StatusDto::up());
    }
}
