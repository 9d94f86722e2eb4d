//! Resource URL construction for the image service.
//!
//! Two addressing schemes exist side by side. Master formats are served as
//! plain files under a storage path; everything else goes through the tiled
//! image API, which renders on demand from region, size, rotation, and
//! quality parameters.

use crate::config::{ConfigError, RunConfig};
use crate::options::RequestOptions;

/// Formats addressed by the raw storage scheme. Every other format is
/// requested through the tiled image API.
pub const RAW_FORMATS: &[&str] = &["gif", "jp2", "tif"];

/// Builds the resource URL for one image.
///
/// Raw scheme: `{protocol}://{subdomain}.{domain}/{service_path}/{gmd}/{id_prefix}{index}.{format}`
/// with every `:` in the gmd rewritten to `/`.
///
/// Tiled scheme: `{protocol}://{subdomain}.{domain}/{service_path}:{gmd}:{id_prefix}{index}/{region}/pct:{size}/{rotation}/{quality}.{format}`
/// with the gmd kept in its colon form.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownFormat`] when the configured `service_path`
/// mapping has no entry for the requested format.
pub fn build_url(
    options: &RequestOptions,
    run: &RunConfig,
    gmd: &str,
    id_prefix: &str,
    index: &str,
) -> Result<String, ConfigError> {
    let format = options.format.as_str();
    let service_path = run.service_path_for(format)?;
    let host = format!("{}://{}.{}", run.protocol, run.subdomain, run.domain);

    if RAW_FORMATS.contains(&format) {
        let gmd_path = gmd.replace(':', "/");
        return Ok(format!(
            "{host}/{service_path}/{gmd_path}/{id_prefix}{index}.{format}"
        ));
    }

    let region = &options.region;
    let size = options.size;
    let rotation = options.rotation_degrees;
    let quality = &options.quality;
    Ok(format!(
        "{host}/{service_path}:{gmd}:{id_prefix}{index}/{region}/pct:{size}/{rotation}/{quality}.{format}"
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    use super::*;

    fn run_config() -> RunConfig {
        let mut service_path = BTreeMap::new();
        service_path.insert("jpg".to_string(), "image-services/iiif/service".to_string());
        service_path.insert("gif".to_string(), "storage-services/service/gmd".to_string());
        service_path.insert("jp2".to_string(), "storage-services/service/gmd".to_string());
        service_path.insert("tif".to_string(), "tif".to_string());
        RunConfig {
            protocol: "https".to_string(),
            subdomain: "tile".to_string(),
            domain: "loc.gov".to_string(),
            service_path,
        }
    }

    fn options(format: &str) -> RequestOptions {
        RequestOptions {
            output: PathBuf::from("./output"),
            format: format.to_string(),
            region: "full".to_string(),
            size: 25,
            rotation_degrees: 0,
            quality: "default".to_string(),
        }
    }

    #[test]
    fn test_build_url_raw_scheme_for_master_format() {
        let url = build_url(&options("tif"), &run_config(), "g3290:g3290", "ct000", "003").unwrap();
        assert_eq!(url, "https://tile.loc.gov/tif/g3290/g3290/ct000003.tif");
    }

    #[test]
    fn test_build_url_raw_scheme_rewrites_every_gmd_colon() {
        let url = build_url(
            &options("jp2"),
            &run_config(),
            "g4114m:g4114am:extra",
            "ct0008",
            "001",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://tile.loc.gov/storage-services/service/gmd/g4114m/g4114am/extra/ct0008001.jp2"
        );
    }

    #[test]
    fn test_build_url_tiled_scheme_for_rendered_format() {
        let url = build_url(
            &options("jpg"),
            &run_config(),
            "g4114m:g4114am",
            "ct0008",
            "001",
        )
        .unwrap();
        assert_eq!(
            url,
            "https://tile.loc.gov/image-services/iiif/service:g4114m:g4114am:ct0008001/full/pct:25/0/default.jpg"
        );
    }

    #[test]
    fn test_build_url_tiled_scheme_keeps_gmd_colons() {
        let url = build_url(
            &options("jpg"),
            &run_config(),
            "g3290:g3290",
            "ct000",
            "003",
        )
        .unwrap();
        assert!(url.contains(":g3290:g3290:ct000003/"), "got: {url}");
    }

    #[test]
    fn test_build_url_tiled_scheme_renders_request_options() {
        let mut options = options("jpg");
        options.region = "0,0,512,512".to_string();
        options.size = 50;
        options.rotation_degrees = 90;
        options.quality = "gray".to_string();
        let url = build_url(&options, &run_config(), "g4114m:g4114am", "ct0008", "002").unwrap();
        assert!(url.ends_with("/0,0,512,512/pct:50/90/gray.jpg"), "got: {url}");
    }

    #[test]
    fn test_build_url_every_raw_format_uses_storage_scheme() {
        for format in RAW_FORMATS {
            let url = build_url(&options(format), &run_config(), "g3290:g3290", "ct000", "003")
                .unwrap();
            assert!(
                !url.contains("pct:"),
                "format {format} must not use the tiled scheme: {url}"
            );
        }
    }

    #[test]
    fn test_build_url_unknown_format_is_error() {
        let err = build_url(&options("png"), &run_config(), "g3290:g3290", "ct000", "003")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat { .. }));
    }
}
