use std::collections::HashMap;

use log::{debug, info, warn};

use crate::error::{RenderError, TextureError};
use crate::gfx::rendering::renderer::{Renderer, TextureLoader};

use super::shape::Shape;

/// Index of a shape in its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

/// Owns every shape, addressable by id or by unique name
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    names: HashMap<String, ShapeId>,
    // handed out for unknown names so callers can mutate it harmlessly
    scratch: Shape,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `shape` under its name. A shape already registered under the
    /// same name is replaced and keeps its id.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        if let Some(&id) = self.names.get(&shape.name) {
            debug!("replacing shape '{}'", shape.name);
            self.shapes[id.0] = shape;
            return id;
        }
        let id = ShapeId(self.shapes.len());
        self.names.insert(shape.name.clone(), id);
        self.shapes.push(shape);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<ShapeId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0)
    }

    /// The shape called `name`, or an empty shape if there is none
    pub fn shape(&self, name: &str) -> &Shape {
        match self.lookup(name) {
            Some(id) => &self.shapes[id.0],
            None => {
                warn!("shape '{}' not found", name);
                &self.scratch
            }
        }
    }

    /// Mutable access to the shape called `name`.
    ///
    /// Unknown names get a freshly reset scratch shape that is never drawn, so
    /// writes through it are discarded.
    pub fn shape_mut(&mut self, name: &str) -> &mut Shape {
        match self.lookup(name) {
            Some(id) => &mut self.shapes[id.0],
            None => {
                warn!("shape '{}' not found", name);
                self.scratch = Shape::empty();
                &mut self.scratch
            }
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.shapes.iter_mut()
    }

    /// Loads the texture of every shape that names one and has none bound yet
    pub fn load_textures<L: TextureLoader + ?Sized>(
        &mut self,
        loader: &mut L,
    ) -> Result<(), TextureError> {
        for shape in self.shapes.iter_mut().filter(|s| s.texture.is_none()) {
            if let Some(path) = &shape.texture_path {
                let id = loader.load_texture(path)?;
                info!("loaded texture {} for '{}'", path.display(), shape.name);
                shape.texture = Some(id);
            }
        }
        Ok(())
    }

    /// Begins a frame and draws every shape in registration order.
    ///
    /// The caller ends the frame.
    pub fn draw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), RenderError> {
        renderer.begin_frame()?;
        for shape in &mut self.shapes {
            shape.draw(renderer)?;
        }
        Ok(())
    }
}
