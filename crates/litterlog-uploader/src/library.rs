//! Device photo-library seam.
//!
//! The platform gallery is consumed through a cursor-paginated trait;
//! each page is filtered to photos that actually carry coordinates
//! before entering the store as gallery-origin records. Device
//! libraries report (0, 0) for photos without a GPS fix, so zero
//! coordinates are treated as absent here.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use litterlog_core::{AppError, PhotoOrigin, PhotoRecord, PhotoStore};

/// One photo as reported by the device library.
#[derive(Debug, Clone)]
pub struct LibraryPhoto {
    pub uri: String,
    pub filename: String,
    pub date: DateTime<Utc>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl LibraryPhoto {
    /// Whether the library entry carries a usable GPS fix.
    pub fn has_location(&self) -> bool {
        matches!((self.lat, self.lon), (Some(lat), Some(lon)) if lat != 0.0 || lon != 0.0)
    }
}

/// One page of library results plus the cursor for the next page.
#[derive(Debug, Clone)]
pub struct LibraryPage {
    pub photos: Vec<LibraryPhoto>,
    pub next_cursor: Option<String>,
}

/// Cursor-paginated access to the device photo library.
///
/// Implementations surface [`AppError::PermissionDenied`] when the
/// platform withholds library access; callers route that to the
/// permission-request flow rather than treating it as a failure.
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> Result<LibraryPage, AppError>;
}

/// Walk the whole library page by page, adding located photos to the
/// store as gallery records. Returns the number of records considered
/// (after the location filter; the store still dedups by uri).
pub async fn import_all(
    library: &dyn PhotoLibrary,
    store: &mut PhotoStore,
    page_size: usize,
) -> Result<usize, AppError> {
    let mut cursor: Option<String> = None;
    let mut imported = 0;

    loop {
        let page = library.fetch_page(cursor.as_deref(), page_size).await?;

        let records: Vec<PhotoRecord> = page
            .photos
            .into_iter()
            .filter(LibraryPhoto::has_location)
            .map(|photo| {
                PhotoRecord::new_device(
                    store.allocate_local_id(),
                    PhotoOrigin::Gallery,
                    photo.uri,
                    photo.filename,
                    photo.date,
                    photo.lat,
                    photo.lon,
                )
            })
            .collect();

        imported += records.len();
        store.add_records(records, PhotoOrigin::Gallery);

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::info!(imported = imported, "Photo library import finished");
    Ok(imported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(uri: &str, lat: Option<f64>, lon: Option<f64>) -> LibraryPhoto {
        LibraryPhoto {
            uri: uri.to_string(),
            filename: uri.trim_start_matches("file:///").to_string(),
            date: Utc::now(),
            lat,
            lon,
        }
    }

    struct PagedLibrary {
        pages: Vec<LibraryPage>,
    }

    #[async_trait]
    impl PhotoLibrary for PagedLibrary {
        async fn fetch_page(
            &self,
            cursor: Option<&str>,
            _limit: usize,
        ) -> Result<LibraryPage, AppError> {
            let index: usize = cursor.map(|c| c.parse().unwrap()).unwrap_or(0);
            self.pages
                .get(index)
                .cloned()
                .ok_or_else(|| AppError::InvalidInput(format!("No page at cursor {}", index)))
        }
    }

    #[test]
    fn zero_coordinates_count_as_unlocated() {
        assert!(!photo("file:///a.jpg", Some(0.0), Some(0.0)).has_location());
        assert!(!photo("file:///a.jpg", None, Some(51.0)).has_location());
        assert!(photo("file:///a.jpg", Some(0.0), Some(51.0)).has_location());
        assert!(photo("file:///a.jpg", Some(53.3), Some(-6.2)).has_location());
    }

    #[tokio::test]
    async fn import_walks_pages_and_filters_unlocated() {
        let library = PagedLibrary {
            pages: vec![
                LibraryPage {
                    photos: vec![
                        photo("file:///a.jpg", Some(53.3), Some(-6.2)),
                        photo("file:///b.jpg", Some(0.0), Some(0.0)),
                    ],
                    next_cursor: Some("1".to_string()),
                },
                LibraryPage {
                    photos: vec![photo("file:///c.jpg", Some(48.8), Some(2.3))],
                    next_cursor: None,
                },
            ],
        };

        let mut store = PhotoStore::new();
        let imported = import_all(&library, &mut store, 2).await.unwrap();

        assert_eq!(imported, 2);
        assert_eq!(store.len(), 2);
        assert!(store.records().iter().all(|r| r.is_geotagged()));
    }

    #[tokio::test]
    async fn import_dedups_against_existing_records() {
        let library = PagedLibrary {
            pages: vec![LibraryPage {
                photos: vec![photo("file:///a.jpg", Some(53.3), Some(-6.2))],
                next_cursor: None,
            }],
        };

        let mut store = PhotoStore::new();
        import_all(&library, &mut store, 10).await.unwrap();
        import_all(&library, &mut store, 10).await.unwrap();
        assert_eq!(store.len(), 1);
    }
}
