use super::backend::{GlBackend, RawId};
use super::buffer::{IndexBuffer, VertexBuffer};
use super::error::{RenderError, Result};
use super::layout::VertexLayout;

/// A vertex buffer bound to attribute locations, plus the derived draw count.
#[derive(Debug)]
pub struct VertexArray {
    id: RawId,
    vertex_buffer: Option<VertexBuffer>,
    index_buffer: Option<IndexBuffer>,
    stride: usize,
    data_size: usize,
    vertex_count: usize,
}

impl VertexArray {
    pub fn new<B: GlBackend + ?Sized>(gl: &B) -> Result<Self> {
        let id = gl.create_vertex_array().map_err(RenderError::Backend)?;
        Ok(Self {
            id,
            vertex_buffer: None,
            index_buffer: None,
            stride: 0,
            data_size: 0,
            vertex_count: 0,
        })
    }

    /// Binds `buffer` and declares one attribute per layout element.
    ///
    /// Fails with `VertexLayoutMismatch` when the buffer size is not a whole
    /// number of vertices; the rejected buffer is deleted.
    pub fn add_buffer<B: GlBackend + ?Sized>(
        &mut self,
        gl: &B,
        buffer: VertexBuffer,
        layout: &VertexLayout,
    ) -> Result<()> {
        let Some(vertex_count) = layout.vertex_count(buffer.byte_len()) else {
            let err = RenderError::VertexLayoutMismatch {
                byte_len: buffer.byte_len(),
                vertex_size: layout.vertex_size(),
            };
            buffer.delete(gl);
            return Err(err);
        };

        self.bind(gl);
        buffer.bind(gl);

        let stride = layout.stride() as i32;
        for (index, attribute, offset) in layout.offsets() {
            gl.vertex_attribute(index, attribute, stride, offset as i32);
        }

        self.stride = layout.stride();
        self.data_size = buffer.byte_len();
        self.vertex_count = vertex_count;
        self.vertex_buffer = Some(buffer);
        Ok(())
    }

    /// Attaches an index buffer; draws of this array become indexed.
    pub fn set_index_buffer<B: GlBackend + ?Sized>(&mut self, gl: &B, indices: &[u32]) -> Result<()> {
        self.bind(gl);
        self.index_buffer = Some(IndexBuffer::new(gl, indices)?);
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> RawId {
        self.id
    }

    /// Bytes per vertex.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Size of the attached vertex data in bytes.
    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }

    /// Issues the triangle draw for this array. The array must be bound.
    pub(crate) fn draw<B: GlBackend + ?Sized>(&self, gl: &B) {
        match &self.index_buffer {
            Some(ib) => gl.draw_elements(ib.count() as i32),
            None => gl.draw_arrays(0, self.vertex_count as i32),
        }
    }

    pub fn bind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_vertex_array(Some(self.id));
    }

    pub fn unbind<B: GlBackend + ?Sized>(&self, gl: &B) {
        gl.bind_vertex_array(None);
    }

    /// Deletes the array and the buffers it owns.
    pub fn delete<B: GlBackend + ?Sized>(self, gl: &B) {
        gl.delete_vertex_array(self.id);
        if let Some(vb) = self.vertex_buffer {
            vb.delete(gl);
        }
        if let Some(ib) = self.index_buffer {
            ib.delete(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::layout::ElementType;
    use crate::render::mock::{Call, RecordingGl};

    #[test]
    fn attributes_use_running_offsets() {
        let gl = RecordingGl::default();
        let mut va = VertexArray::new(&gl).unwrap();
        let vb = VertexBuffer::new(&gl, &[0.0; 16]).unwrap();
        gl.clear_calls();

        va.add_buffer(&gl, vb, &VertexLayout::position_uv_normal()).unwrap();

        let attrs: Vec<Call> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::VertexAttribute { .. }))
            .collect();
        assert_eq!(
            attrs,
            vec![
                Call::VertexAttribute { index: 0, components: 3, element_type: ElementType::Float, stride: 32, offset: 0 },
                Call::VertexAttribute { index: 1, components: 2, element_type: ElementType::Float, stride: 32, offset: 12 },
                Call::VertexAttribute { index: 2, components: 3, element_type: ElementType::Float, stride: 32, offset: 20 },
            ]
        );
        assert_eq!(va.vertex_count(), 2);
        assert_eq!(va.data_size(), 64);
        assert_eq!(va.stride(), 32);
    }

    #[test]
    fn mismatched_layout_is_a_configuration_error() {
        let gl = RecordingGl::default();
        let mut va = VertexArray::new(&gl).unwrap();
        let vb = VertexBuffer::new(&gl, &[0.0; 7]).unwrap();

        let vb_id = vb.id().get();

        let err = va.add_buffer(&gl, vb, &VertexLayout::position_uv()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::VertexLayoutMismatch { byte_len: 28, vertex_size: 20 }
        ));
        assert_eq!(gl.calls().last(), Some(&Call::DeleteBuffer(vb_id)));
        assert_eq!(va.vertex_count(), 0);
    }

    #[test]
    fn indexed_arrays_draw_elements() {
        let gl = RecordingGl::default();
        let mut va = VertexArray::new(&gl).unwrap();
        let vb = VertexBuffer::new(&gl, &[0.0; 20]).unwrap();
        va.add_buffer(&gl, vb, &VertexLayout::position_uv()).unwrap();
        va.set_index_buffer(&gl, &[0, 1, 2, 2, 3, 0]).unwrap();
        gl.clear_calls();

        va.draw(&gl);
        assert_eq!(gl.calls(), vec![Call::DrawElements(6)]);

        let deleted_before = gl.count(|c| matches!(c, Call::DeleteBuffer(_)));
        va.delete(&gl);
        assert_eq!(gl.count(|c| matches!(c, Call::DeleteBuffer(_))), deleted_before + 2);
    }
}
