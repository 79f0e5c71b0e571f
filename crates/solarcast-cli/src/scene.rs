//! Scene documents and role resolution.
//!
//! A scene is a flat list of named objects, each carrying one or more
//! display meshes. The object name decides its role: `Base`, `Design` or
//! `Context`. Anything else is ignored.

use serde::Deserialize;
use solarcast::{IndexedMesh, MeshRole};
use tracing::{debug, warn};

/// A scene document as read from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneDocument {
    /// Objects in document order.
    pub objects: Vec<SceneObject>,
}

/// A named object with its display meshes.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneObject {
    /// Object name; selects the role.
    pub name: String,
    /// Renderable meshes; only the first one is used.
    #[serde(default, alias = "displayValue")]
    pub display_value: Vec<IndexedMesh>,
}

impl SceneObject {
    /// Role implied by the object name.
    pub fn role(&self) -> Option<MeshRole> {
        match self.name.as_str() {
            "Base" => Some(MeshRole::Base),
            "Design" => Some(MeshRole::Design),
            "Context" => Some(MeshRole::Context),
            _ => None,
        }
    }

    /// The mesh that represents this object.
    pub fn display_mesh(&self) -> Option<&IndexedMesh> {
        self.display_value.first()
    }
}

/// Meshes grouped by role, ready for the estimator.
#[derive(Debug, Clone, Default)]
pub struct ResolvedScene {
    /// Mesh of the first base object.
    pub base: Option<IndexedMesh>,
    /// Design occluders.
    pub design: Vec<IndexedMesh>,
    /// Context occluders.
    pub context: Vec<IndexedMesh>,
}

impl SceneDocument {
    /// Parse a scene from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Group display meshes by role.
    ///
    /// Objects without a display mesh are skipped. Only the first base
    /// object contributes; later ones are reported and ignored.
    pub fn resolve(&self) -> ResolvedScene {
        let mut scene = ResolvedScene::default();

        for object in &self.objects {
            let Some(role) = object.role() else {
                debug!(name = %object.name, "skipping object without a role");
                continue;
            };
            let Some(mesh) = object.display_mesh() else {
                debug!(name = %object.name, "skipping object without a display mesh");
                continue;
            };

            match role {
                MeshRole::Base if scene.base.is_some() => {
                    warn!("scene has more than one base object; using the first");
                }
                MeshRole::Base => scene.base = Some(mesh.clone()),
                MeshRole::Design => scene.design.push(mesh.clone()),
                MeshRole::Context => scene.context.push(mesh.clone()),
            }
        }

        scene
    }
}
