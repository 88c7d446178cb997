//! Container image references

use std::fmt;

use super::ImageOverride;

/// An image reference split into name, tag and digest.
///
/// The tag separator is the last `:` after the last `/`, so registry
/// ports (`registry:5000/app`) stay part of the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageRef<'a> {
    pub name: &'a str,
    pub tag: Option<&'a str>,
    pub digest: Option<&'a str>,
}

impl<'a> ImageRef<'a> {
    pub fn parse(image: &'a str) -> Self {
        let (rest, digest) = match image.split_once('@') {
            Some((rest, digest)) => (rest, Some(digest)),
            None => (image, None),
        };
        let path_start = rest.rfind('/').map_or(0, |i| i + 1);
        match rest[path_start..].rfind(':') {
            Some(i) => Self {
                name: &rest[..path_start + i],
                tag: Some(&rest[path_start + i + 1..]),
                digest,
            },
            None => Self {
                name: rest,
                tag: None,
                digest,
            },
        }
    }

    /// Apply `image` if it targets this reference's name.
    ///
    /// A new digest wins over a new tag; either one replaces both the
    /// existing tag and digest. A rename alone keeps them.
    pub fn apply(&self, image: &ImageOverride) -> Option<String> {
        if self.name != image.name {
            return None;
        }
        let name = image.new_name.as_deref().unwrap_or(self.name);
        let rewritten = if let Some(digest) = &image.digest {
            format!("{name}@{digest}")
        } else if let Some(tag) = &image.new_tag {
            format!("{name}:{tag}")
        } else {
            ImageRef { name, ..*self }.to_string()
        };
        Some(rewritten)
    }
}

impl fmt::Display for ImageRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)?;
        if let Some(tag) = self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}
