//! `multipart/form-data` encoding of the image form.

use crate::types::Submission;

pub const FILE_FIELD: &str = "image_file";
pub const URL_FIELD: &str = "image_url";

/// Encode the form the way a browser submits it.
///
/// Both fields are always present. With no file selected the file part has
/// an empty file name, `application/octet-stream` and no content.
pub fn build_form_multipart(boundary: &str, submission: &Submission) -> Vec<u8> {
    let file_len = submission.file.as_ref().map_or(0, |f| f.data.len());
    let mut body = Vec::with_capacity(file_len + 512);

    let (file_name, mime_type, data) = match &submission.file {
        Some(file) => (file.file_name.as_str(), file.mime_type.as_str(), file.data.as_slice()),
        None => ("", "application/octet-stream", &[][..]),
    };

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{FILE_FIELD}\"; filename=\"{}\"\r\n",
            escape_quoted(file_name)
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    append_field(&mut body, boundary, URL_FIELD, submission.url_value());
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

// Browsers percent-encode these inside quoted header parameters.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImageFile;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_form_still_sends_both_fields() {
        let body = build_form_multipart("b", &Submission::default());
        let expected = "--b\r\n\
            Content-Disposition: form-data; name=\"image_file\"; filename=\"\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n\r\n\
            --b\r\n\
            Content-Disposition: form-data; name=\"image_url\"\r\n\r\n\r\n\
            --b--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn file_part_carries_name_type_and_bytes() {
        let submission = Submission::from_file(ImageFile::new("my \"dog\".png", "image/png", b"PNGDATA".to_vec()));
        let body = String::from_utf8(build_form_multipart("xyz", &submission)).unwrap();

        assert!(body.contains("filename=\"my %22dog%22.png\"\r\nContent-Type: image/png\r\n\r\nPNGDATA\r\n"));
        assert!(body.ends_with("name=\"image_url\"\r\n\r\n\r\n--xyz--\r\n"));
    }
}
