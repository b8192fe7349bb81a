use crate::xml::ElementWrapper;

macro_rules! element_view {
    ($name:ident) => {
        impl From<ElementWrapper> for $name {
            fn from(wrapper: ElementWrapper) -> Self {
                Self { wrapper }
            }
        }

        impl $name {
            pub fn is_null(&self) -> bool {
                self.wrapper.is_null()
            }
        }
    };
}

/// A `<category>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Category {
    wrapper: ElementWrapper,
}

element_view!(Category);

impl Category {
    /// The category text, whitespace-simplified.
    pub fn category(&self) -> String {
        crate::util::simplify_whitespace(&self.wrapper.text())
    }

    pub fn domain(&self) -> String {
        self.wrapper.attribute("domain")
    }
}

/// An `<enclosure>`: a media object attached to an item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enclosure {
    wrapper: ElementWrapper,
}

element_view!(Enclosure);

impl Enclosure {
    pub fn url(&self) -> String {
        self.wrapper.attribute("url")
    }

    /// Size in bytes, `0` if absent or invalid.
    pub fn length(&self) -> u64 {
        self.wrapper.attribute("length").trim().parse().unwrap_or(0)
    }

    pub fn mime_type(&self) -> String {
        self.wrapper.attribute("type")
    }
}

/// The channel `<image>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Image {
    wrapper: ElementWrapper,
}

element_view!(Image);

impl Image {
    pub fn url(&self) -> String {
        self.wrapper.child_text("", "url")
    }

    pub fn title(&self) -> String {
        self.wrapper.child_text("", "title")
    }

    pub fn link(&self) -> String {
        self.wrapper.child_text("", "link")
    }

    pub fn description(&self) -> String {
        self.wrapper.child_text("", "description")
    }

    /// Width in pixels; 88 when missing or unparseable.
    pub fn width(&self) -> u32 {
        self.wrapper.child_text("", "width").parse().unwrap_or(88)
    }

    /// Height in pixels; 31 when missing or unparseable.
    pub fn height(&self) -> u32 {
        self.wrapper.child_text("", "height").parse().unwrap_or(31)
    }
}

/// `<cloud>`: an rssCloud notification endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cloud {
    wrapper: ElementWrapper,
}

element_view!(Cloud);

impl Cloud {
    pub fn domain(&self) -> String {
        self.wrapper.attribute("domain")
    }

    /// Port number, `-1` if absent or invalid.
    pub fn port(&self) -> i32 {
        self.wrapper.attribute("port").trim().parse().unwrap_or(-1)
    }

    pub fn path(&self) -> String {
        self.wrapper.attribute("path")
    }

    pub fn register_procedure(&self) -> String {
        self.wrapper.attribute("registerProcedure")
    }

    pub fn protocol(&self) -> String {
        self.wrapper.attribute("protocol")
    }
}

/// `<textInput>` (or Netscape's `<textinput>`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    wrapper: ElementWrapper,
}

element_view!(TextInput);

impl TextInput {
    pub fn title(&self) -> String {
        self.wrapper.child_text("", "title")
    }

    pub fn name(&self) -> String {
        self.wrapper.child_text("", "name")
    }

    pub fn description(&self) -> String {
        self.wrapper.child_text("", "description")
    }

    pub fn link(&self) -> String {
        self.wrapper.child_text("", "link")
    }
}

/// An item's `<source>`: the channel it was republished from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Source {
    wrapper: ElementWrapper,
}

element_view!(Source);

impl Source {
    pub fn source(&self) -> String {
        self.wrapper.text()
    }

    pub fn url(&self) -> String {
        self.wrapper.attribute("url")
    }
}
