//! Web client assets
//!
//! The built client in `frontend/dist/` is embedded with rust-embed. Files in
//! `./frontend-custom/` take precedence, and unknown paths fall back to
//! `index.html` so client-side routing works.

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use rust_embed::Embed;
use std::path::Path;

#[derive(Embed)]
#[folder = "frontend/dist/"]
struct FrontendAssets;

fn extension(path: &str) -> &str {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
}

fn mime_type(path: &str) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" | "mjs" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" | "map" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",
        "wasm" => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Hashed build outputs never change under the same name
fn is_immutable(path: &str) -> bool {
    matches!(
        extension(path),
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp"
    )
}

fn read_asset(path: &str) -> Option<Vec<u8>> {
    // never let the override directory escape upwards
    if !path.contains("..")
        && let Ok(data) = std::fs::read(Path::new("./frontend-custom").join(path))
    {
        return Some(data);
    }
    FrontendAssets::get(path).map(|f| f.data.to_vec())
}

pub async fn serve_frontend(req: HttpRequest) -> ActixResult<HttpResponse> {
    let path = req.match_info().query("tail").trim_start_matches('/');

    let (content, file_path) = match (path.is_empty(), read_asset(path)) {
        (false, Some(content)) => (Some(content), path),
        _ => (read_asset("index.html"), "index.html"),
    };

    let Some(data) = content else {
        return Ok(HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body("Web client not available"));
    };

    let cache_control = if is_immutable(file_path) {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache, no-store, must-revalidate"
    };

    Ok(HttpResponse::Ok()
        .content_type(mime_type(file_path))
        .insert_header(("Cache-Control", cache_control))
        .body(data))
}

pub fn configure_frontend_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{tail:.*}", web::get().to(serve_frontend));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type() {
        assert_eq!(mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(mime_type("app.mjs"), "application/javascript; charset=utf-8");
        assert_eq!(mime_type("logo.png"), "image/png");
        assert_eq!(mime_type("unknown.xyz"), "application/octet-stream");
    }

    #[test]
    fn test_cache_policy() {
        assert!(is_immutable("assets/app.3f2a.js"));
        assert!(!is_immutable("index.html"));
        assert!(!is_immutable("manifest.json"));
    }
}
