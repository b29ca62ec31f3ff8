use std::mem::size_of;

/// Scalar type of a vertex attribute component.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ElementType {
    Float,
    Uint,
}

impl ElementType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            ElementType::Float => size_of::<f32>(),
            ElementType::Uint => size_of::<u32>(),
        }
    }
}

/// One attribute inside an interleaved vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub components: u32,
    pub element_type: ElementType,
    pub normalized: bool,
}

impl VertexAttribute {
    /// Bytes this attribute occupies within a vertex.
    #[inline]
    pub const fn byte_size(&self) -> usize {
        self.components as usize * self.element_type.size()
    }
}

/// Describes how interleaved vertex bytes map to shader attributes.
///
/// Attribute `i` in push order is bound to shader attribute location `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    stride: usize,
    total_components: u32,
}

impl VertexLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// position (vec3) + texture coordinates (vec2).
    pub fn position_uv() -> Self {
        let mut layout = Self::new();
        layout.push_float(3);
        layout.push_float(2);
        layout
    }

    /// position (vec3) + texture coordinates (vec2) + normal (vec3).
    pub fn position_uv_normal() -> Self {
        let mut layout = Self::position_uv();
        layout.push_float(3);
        layout
    }

    pub fn push_float(&mut self, components: u32) -> &mut Self {
        self.push(VertexAttribute {
            components,
            element_type: ElementType::Float,
            normalized: false,
        })
    }

    pub fn push_uint(&mut self, components: u32) -> &mut Self {
        self.push(VertexAttribute {
            components,
            element_type: ElementType::Uint,
            normalized: false,
        })
    }

    fn push(&mut self, attribute: VertexAttribute) -> &mut Self {
        self.stride += attribute.byte_size();
        self.total_components += attribute.components;
        self.attributes.push(attribute);
        self
    }

    #[inline]
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Components per vertex across all attributes.
    #[inline]
    pub fn total_components(&self) -> u32 {
        self.total_components
    }

    /// Iterates `(location, attribute, byte offset)` in layout order.
    pub fn offsets(&self) -> impl Iterator<Item = (u32, &VertexAttribute, usize)> {
        self.attributes
            .iter()
            .enumerate()
            .scan(0usize, |offset, (i, attr)| {
                let current = *offset;
                *offset += attr.byte_size();
                Some((i as u32, attr, current))
            })
    }

    /// Number of whole vertices in `byte_len` bytes, or `None` when the bytes
    /// do not split into whole vertices (or the layout is empty).
    ///
    /// Vertex size is measured as `total_components * size_of::<f32>()`.
    pub fn vertex_count(&self, byte_len: usize) -> Option<usize> {
        let vertex_size = self.vertex_size();
        if vertex_size == 0 || byte_len % vertex_size != 0 {
            return None;
        }
        Some(byte_len / vertex_size)
    }

    #[inline]
    pub(crate) fn vertex_size(&self) -> usize {
        self.total_components as usize * size_of::<f32>()
    }
}
