use serde::{Deserialize, Serialize};

/// One addressable content source of the map.
///
/// `basemap` is not part of the host's layer record; it is derived from the
/// map view's basemap id list when the [`MapView`](crate::map::MapView) is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    /// Root URL of the remote map service rendering this layer, if any.
    pub url: Option<String>,
    /// Whether the layer draws anything at the current map scale.
    pub visible_at_scale: bool,
    #[serde(skip)]
    pub(crate) basemap: bool,
}

impl LayerDescriptor {
    /// A visible layer backed by a remote map service.
    pub fn remote<S: Into<String>, U: Into<String>>(id: S, url: U) -> Self {
        Self {
            id: id.into(),
            url: Some(url.into()),
            visible_at_scale: true,
            basemap: false,
        }
    }

    /// A layer with no remote service (e.g. client-side graphics).
    pub fn local<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            url: None,
            visible_at_scale: true,
            basemap: false,
        }
    }

    pub fn with_visibility(mut self, visible_at_scale: bool) -> Self {
        self.visible_at_scale = visible_at_scale;
        self
    }

    pub fn is_basemap(&self) -> bool {
        self.basemap
    }

    /// The service URL, ignoring empty strings.
    pub fn service_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }
}
