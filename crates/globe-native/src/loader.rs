//! Background marker loading for the desktop frontend.
//!
//! Each request runs on its own thread and only posts its outcome back; the
//! event-loop thread applies it on the next tick.

use globe_core::{AssetLoader, LoadError, LoadRequest, LoadSender};
use globe_render::{decode_marker_image, MarkerImage};
use std::thread;

/// Reads local files or fetches `http(s)://` URIs, then decodes the image.
pub struct ThreadLoader;

pub fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

pub fn read_bytes(uri: &str) -> Result<Vec<u8>, LoadError> {
    if is_remote(uri) {
        let resp = reqwest::blocking::get(uri)
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        let bytes = resp.bytes().map_err(|e| LoadError::Fetch(e.to_string()))?;
        Ok(bytes.to_vec())
    } else {
        let path = uri.strip_prefix("file://").unwrap_or(uri);
        std::fs::read(path).map_err(|e| LoadError::Fetch(format!("{path}: {e}")))
    }
}

impl AssetLoader<MarkerImage> for ThreadLoader {
    fn load(&self, request: LoadRequest, done: LoadSender<MarkerImage>) {
        let spawned = thread::Builder::new()
            .name(format!("load-{}", request.id))
            .spawn({
                let request = request.clone();
                let done = done.clone();
                move || match read_bytes(&request.uri).and_then(|b| decode_marker_image(&b)) {
                    Ok(image) => done.loaded(request.id, image),
                    Err(e) => done.failed(request.id, e),
                }
            });
        if let Err(e) = spawned {
            done.failed(request.id, LoadError::Fetch(format!("spawn failed: {e}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globe_core::{LoadOutcome, LoadQueue, MarkerId};
    use std::time::{Duration, Instant};

    fn wait_for_one(queue: &LoadQueue<MarkerImage>) -> LoadOutcome<MarkerImage> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = queue.drain().into_iter().next() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "load never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn remote_uris_are_recognised() {
        assert!(is_remote("https://example.org/a.png"));
        assert!(is_remote("http://example.org/a.png"));
        assert!(!is_remote("assets/a.png"));
        assert!(!is_remote("file:///tmp/a.png"));
    }

    #[test]
    fn missing_file_reports_failure() {
        let queue = LoadQueue::new();
        ThreadLoader.load(
            LoadRequest {
                id: MarkerId(3),
                uri: "/definitely/not/here.png".into(),
            },
            queue.sender(),
        );
        match wait_for_one(&queue) {
            LoadOutcome::Failed(id, LoadError::Fetch(_)) => assert_eq!(id, MarkerId(3)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn local_png_loads() {
        let path = std::env::temp_dir().join(format!("globe-native-{}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 3, image::Rgba([0, 255, 0, 255]))
            .save(&path)
            .unwrap();
        let queue = LoadQueue::new();
        ThreadLoader.load(
            LoadRequest {
                id: MarkerId(0),
                uri: path.to_string_lossy().into_owned(),
            },
            queue.sender(),
        );
        let outcome = wait_for_one(&queue);
        let _ = std::fs::remove_file(&path);
        match outcome {
            LoadOutcome::Loaded(id, img) => {
                assert_eq!(id, MarkerId(0));
                assert_eq!((img.width, img.height), (3, 3));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
