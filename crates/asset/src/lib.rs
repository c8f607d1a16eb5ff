//! Asset loading: OBJ meshes into GPU-ready attribute and index arrays.

pub mod error;
pub mod mesh;
pub mod obj;
pub mod wireframe;

pub use error::{Attribute, ObjError};
pub use mesh::{Bounds, MeshData};
pub use obj::{load_obj_from_path, load_obj_from_reader, parse_obj_str};
pub use wireframe::{EdgeKey, edge_key, wireframe_indices};
