//! Document access.
//!
//! The import pipeline only needs the root `viewBox` and the shape elements
//! in document order. [`ShapeDocument`] abstracts exactly that, so any
//! markup source can feed the pipeline. [`XmlDocument`] is the `roxmltree`
//! implementation used for SVG text.

use svg3d_core::ImportError;

/// Shape element kinds that yield contours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Path,
    Polygon,
    Rect,
    Circle,
    Ellipse,
}

impl ShapeKind {
    /// Match an element's local name.
    pub fn from_tag(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "polygon" => Some(Self::Polygon),
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "ellipse" => Some(Self::Ellipse),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Polygon => "polygon",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
        }
    }
}

/// A shape element with string attributes.
pub trait ShapeElement {
    fn kind(&self) -> ShapeKind;
    fn attribute(&self, name: &str) -> Option<&str>;
}

impl<T: ShapeElement + ?Sized> ShapeElement for &T {
    fn kind(&self) -> ShapeKind {
        (**self).kind()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        (**self).attribute(name)
    }
}

/// A parsed document that exposes its shape elements.
pub trait ShapeDocument {
    type Element<'a>: ShapeElement
    where
        Self: 'a;

    /// Attribute of the root element.
    fn root_attribute(&self, name: &str) -> Option<&str>;

    /// Every shape element at any depth, in document order.
    fn shape_elements(&self) -> Vec<Self::Element<'_>>;
}

/// SVG text parsed with `roxmltree`.
pub struct XmlDocument<'input> {
    doc: roxmltree::Document<'input>,
}

impl<'input> XmlDocument<'input> {
    /// Parse markup whose root element must be `svg`.
    ///
    /// DTDs are allowed since many exported SVG files carry a DOCTYPE.
    pub fn parse(text: &'input str) -> Result<Self, ImportError> {
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(text, options).map_err(|e| match e {
            roxmltree::Error::NoRootNode => ImportError::NoRootElement,
            other => ImportError::Parse {
                message: other.to_string(),
            },
        })?;

        if doc.root_element().tag_name().name() != "svg" {
            return Err(ImportError::NoRootElement);
        }
        Ok(Self { doc })
    }
}

/// Shape element backed by a `roxmltree` node.
#[derive(Debug, Clone, Copy)]
pub struct XmlElement<'a, 'input> {
    kind: ShapeKind,
    node: roxmltree::Node<'a, 'input>,
}

impl ShapeElement for XmlElement<'_, '_> {
    fn kind(&self) -> ShapeKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.node.attribute(name)
    }
}

impl<'input> ShapeDocument for XmlDocument<'input> {
    type Element<'a>
        = XmlElement<'a, 'input>
    where
        Self: 'a;

    fn root_attribute(&self, name: &str) -> Option<&str> {
        self.doc.root_element().attribute(name)
    }

    fn shape_elements(&self) -> Vec<Self::Element<'_>> {
        self.doc
            .descendants()
            .filter(|node| node.is_element())
            .filter_map(|node| {
                ShapeKind::from_tag(node.tag_name().name()).map(|kind| XmlElement { kind, node })
            })
            .collect()
    }
}
