use uuid::Uuid;

/// Multipart field carrying the image
pub const PROFILE_IMAGE_FIELD: &str = "profile_image";

/// Sub-directory of the upload root, also the URL segment after `/uploads/`
pub const PROFILE_IMAGE_DIR: &str = "profile_images";

/// Spaces become `_`; anything but ASCII alphanumerics, `.`, `_` and `-` is dropped
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect()
}

/// Split at the last `.`; the extension keeps its dot. No dot means no extension.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// `<uuid>_<sanitized stem><ext>`
pub fn unique_file_name(original: &str) -> String {
    let cleaned = sanitize_filename(original);
    let (stem, ext) = split_extension(&cleaned);
    format!("{}_{}{}", Uuid::new_v4(), stem, ext)
}
