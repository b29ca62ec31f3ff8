use super::backend::{BufferTarget, GlBackend, RawId};
use super::error::{RenderError, Result};

/// Static vertex data uploaded to an `ARRAY_BUFFER`.
///
/// The buffer is left bound after creation so a vertex array can capture it.
#[derive(Debug)]
pub struct VertexBuffer {
    id: RawId,
    byte_len: usize,
}

impl VertexBuffer {
    pub fn new<B: GlBackend + ?Sized>(gl: &B, data: &[f32]) -> Result<Self> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let id = gl.create_buffer().map_err(RenderError::Backend)?;
        gl.bind_buffer(BufferTarget::Array, Some(id));
        gl.buffer_data(BufferTarget::Array, bytes);

        Ok(Self {
            id,
            byte_len: bytes.len(),
        })
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    /// Size of the uploaded data in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn bind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_buffer(BufferTarget::Array, Some(self.id));
    }

    pub fn unbind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_buffer(BufferTarget::Array, None);
    }

    pub fn delete<B: GlBackend + ?Sized>(self, gl: &B) {
        gl.delete_buffer(self.id);
    }
}

/// `u32` indices for indexed triangle-list draws.
#[derive(Debug)]
pub struct IndexBuffer {
    id: RawId,
    count: usize,
}

impl IndexBuffer {
    /// Uploads `indices` to an `ELEMENT_ARRAY_BUFFER`.
    ///
    /// The element binding is recorded by whichever vertex array is bound at
    /// the time of the call.
    pub fn new<B: GlBackend + ?Sized>(gl: &B, indices: &[u32]) -> Result<Self> {
        let id = gl.create_buffer().map_err(RenderError::Backend)?;
        gl.bind_buffer(BufferTarget::ElementArray, Some(id));
        gl.buffer_data(BufferTarget::ElementArray, bytemuck::cast_slice(indices));

        Ok(Self {
            id,
            count: indices.len(),
        })
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    /// Number of indices.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn bind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_buffer(BufferTarget::ElementArray, Some(self.id));
    }

    pub fn unbind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_buffer(BufferTarget::ElementArray, None);
    }

    pub fn delete<B: GlBackend + ?Sized>(self, gl: &B) {
        gl.delete_buffer(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mock::{Call, RecordingGl};

    #[test]
    fn vertex_buffer_records_byte_size() {
        let gl = RecordingGl::default();
        let vb = VertexBuffer::new(&gl, &[0.0; 15]).unwrap();

        assert_eq!(vb.byte_len(), 60);
        assert_eq!(
            gl.calls(),
            vec![
                Call::CreateBuffer(vb.id().get()),
                Call::BindBuffer(BufferTarget::Array, Some(vb.id().get())),
                Call::BufferData(BufferTarget::Array, 60),
            ]
        );
    }

    #[test]
    fn index_buffer_counts_indices() {
        let gl = RecordingGl::default();
        let ib = IndexBuffer::new(&gl, &[0, 1, 2, 2, 3, 0]).unwrap();

        assert_eq!(ib.count(), 6);
        assert!(gl.calls().contains(&Call::BufferData(BufferTarget::ElementArray, 24)));

        let id = ib.id().get();
        ib.delete(&gl);
        assert_eq!(gl.calls().last(), Some(&Call::DeleteBuffer(id)));
    }
}
