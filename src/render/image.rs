//! Image resolution: DrawingML blip references and legacy VML shapes.

use roxmltree::Node;

use crate::error::{Error, Result};

use super::{NS_DML, NS_PIC, NS_REL, NS_VML, NS_WML, NS_WPD, Renderer};

impl Renderer<'_> {
    /// Render the first image referenced below `node`, or an empty string.
    ///
    /// Two resolution paths, tried in order:
    /// 1. a DrawingML `a:blip` with an `r:embed` relationship id, usually
    ///    nested under `wp:inline`/`wp:anchor` -> `pic:pic`;
    /// 2. a legacy VML `v:imagedata` with an `r:id`, nested in
    ///    picture/group/shape structures under `w:pict`.
    ///
    /// Only the first match in document order is rendered; a picture node
    /// holding several images contributes one. `inline` drops the
    /// stylesheet's img attributes (no float inside cells and list items).
    pub(crate) fn image(&self, node: Node, inline: bool) -> String {
        match self.find_image_id(node) {
            Ok(Some(id)) => self.image_tag(id, inline),
            Ok(None) => String::new(),
            Err(e) => {
                // Malformed reference: skip this image, keep converting
                log::warn!("{e}");
                String::new()
            }
        }
    }

    fn find_image_id<'a>(&self, node: Node<'a, 'a>) -> Result<Option<&'a str>> {
        // DrawingML path. The blip sits under layers of graphic/graphicData
        // wrappers; narrowing to pic:pic first keeps the scan cheap, and a
        // whole-node fallback covers blips embedded without the wrapper.
        let scope = node
            .descendants()
            .find(|n| n.has_tag_name((NS_PIC, "pic")))
            .unwrap_or(node);
        if let Some(blip) = scope
            .descendants()
            .find(|n| n.has_tag_name((NS_DML, "blip")))
        {
            return match blip.attribute((NS_REL, "embed")) {
                Some(id) => Ok(Some(id)),
                None => Err(Error::MalformedNode(
                    "drawing blip without r:embed".to_string(),
                )),
            };
        }

        // Legacy VML path: images wrapped in shapes, sometimes grouped one
        // or two levels deep.
        for pict in node.children().filter(|n| n.has_tag_name((NS_WML, "pict"))) {
            if let Some(data) = pict
                .descendants()
                .find(|n| n.has_tag_name((NS_VML, "imagedata")))
            {
                return match data.attribute((NS_REL, "id")) {
                    Some(id) => Ok(Some(id)),
                    None => Err(Error::MalformedNode(
                        "shape imagedata without r:id".to_string(),
                    )),
                };
            }
        }

        // A drawing anchor with no blip at all is unexpected structure
        if node
            .descendants()
            .any(|n| n.has_tag_name((NS_WPD, "inline")) || n.has_tag_name((NS_WPD, "anchor")))
        {
            return Err(Error::MalformedNode(
                "drawing without an image reference".to_string(),
            ));
        }

        Ok(None)
    }

    /// Emit the `<img>` tag for a relationship id.
    ///
    /// External targets are used verbatim; internal ones point at the
    /// extracted copy under the configured images location, with the
    /// container's `media/` segment stripped. An unresolved id still emits
    /// the tag, just without `src`.
    fn image_tag(&self, id: &str, inline: bool) -> String {
        let attrs = if inline { String::new() } else { self.attrs("img") };
        match self.resources.get(id) {
            Ok(entry) => {
                let src = if entry.external {
                    entry.target.clone()
                } else {
                    format!("{}{}", self.image_prefix, entry.target.replace("media/", ""))
                };
                format!("<img src='{src}'{attrs}/>")
            }
            Err(e) => {
                log::warn!("{e}, rendering image without src");
                format!("<img{attrs}/>")
            }
        }
    }
}
