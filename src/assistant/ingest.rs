use crate::types::UploadFile;
use std::time::Duration;

/// Files accepted by `start_upload`, waiting to be "processed".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub files: Vec<UploadFile>,
}

/// Waits out the upload latency and returns the file names in input order.
/// File contents are never read.
pub async fn simulate_upload(request: UploadRequest, latency: Duration) -> Vec<String> {
    tokio::time::sleep(latency).await;
    request.files.into_iter().map(|file| file.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_names_keep_input_order_and_duplicates() {
        let request = UploadRequest {
            files: vec![
                UploadFile::new("b.pdf", 10),
                UploadFile::new("a.txt", 20),
                UploadFile::new("b.pdf", 30),
            ],
        };
        let names = simulate_upload(request, Duration::from_millis(2000)).await;
        assert_eq!(names, vec!["b.pdf", "a.txt", "b.pdf"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_waits_for_latency() {
        let start = tokio::time::Instant::now();
        let request = UploadRequest {
            files: vec![UploadFile::new("notes.txt", 1)],
        };
        simulate_upload(request, Duration::from_millis(2000)).await;
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
