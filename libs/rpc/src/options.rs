use std::time::Duration;

use tonic::codec::CompressionEncoding;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};

/// Trailing per-call option.
///
/// Mocks record options without interpreting them; real clients apply the
/// request-level ones with [`apply_options`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOption {
    /// Deadline for this call only
    Timeout(Duration),

    /// Extra ASCII metadata header
    Header { key: String, value: String },

    /// Compression for this call (client-level in tonic)
    Compression(CompressionEncoding),

    /// Maximum size of the decoded response (client-level in tonic)
    MaxDecodingMessageSize(usize),

    /// Maximum size of the encoded request (client-level in tonic)
    MaxEncodingMessageSize(usize),
}

impl CallOption {
    pub fn header(key: impl Into<String>, value: impl Into<String>) -> Self {
        CallOption::Header {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Apply the request-level options to an outgoing request.
///
/// Client-level options (compression, message size limits) have to be set on
/// the generated client and are skipped here.
pub fn apply_options<T>(
    request: &mut tonic::Request<T>,
    options: &[CallOption],
) -> Result<(), tonic::Status> {
    for option in options {
        match option {
            CallOption::Timeout(timeout) => request.set_timeout(*timeout),
            CallOption::Header { key, value } => {
                let key = MetadataKey::<Ascii>::from_bytes(key.as_bytes()).map_err(|_| {
                    tonic::Status::invalid_argument(format!("Invalid metadata key: {key}"))
                })?;
                let value = value.parse::<MetadataValue<Ascii>>().map_err(|_| {
                    tonic::Status::invalid_argument(format!("Invalid metadata value for {}", key.as_str()))
                })?;
                request.metadata_mut().insert(key, value);
            }
            CallOption::Compression(_)
            | CallOption::MaxDecodingMessageSize(_)
            | CallOption::MaxEncodingMessageSize(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_headers_and_timeout() {
        let mut request = tonic::Request::new(());
        let options = vec![
            CallOption::header("x-tenant", "pixie"),
            CallOption::Timeout(Duration::from_millis(250)),
            CallOption::Compression(CompressionEncoding::Zstd),
        ];

        apply_options(&mut request, &options).unwrap();

        assert_eq!(
            request.metadata().get("x-tenant").unwrap().to_str().unwrap(),
            "pixie"
        );
        assert!(request.metadata().get("grpc-timeout").is_some());
    }

    #[test]
    fn test_no_options_leaves_request_untouched() {
        let mut request = tonic::Request::new(());

        apply_options(&mut request, &[]).unwrap();

        assert!(request.metadata().is_empty());
    }

    #[test]
    fn test_invalid_header_key_is_rejected() {
        let mut request = tonic::Request::new(());

        let err = apply_options(&mut request, &[CallOption::header("bad key", "v")]).unwrap_err();

        assert_eq!(err.code(), tonic::Code::InvalidArgument);
        assert!(err.message().contains("bad key"));
    }

    #[test]
    fn test_invalid_header_value_is_rejected() {
        let mut request = tonic::Request::new(());

        let err = apply_options(&mut request, &[CallOption::header("x-note", "line\nbreak")])
            .unwrap_err();

        assert_eq!(err.code(), tonic::Code::InvalidArgument);
    }
}
