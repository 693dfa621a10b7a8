use crate::{
    buffer::{Buffer, BufferType, VertexBufferLayout},
    check,
};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Triangles = gl::TRIANGLES,
    TriangleStrip = gl::TRIANGLE_STRIP,
    Lines = gl::LINES,
    Points = gl::POINTS,
}

/// A vertex array object together with the buffers it reads from.
///
/// Buffers are owned here so they live exactly as long as the VAO that
/// references them.
#[derive(Debug)]
pub struct VertexArray {
    id: u32,
    vertex_buffers: Vec<Buffer>,
    index_buffer: Option<Buffer>,
    components_per_vertex: u32,
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        check!(unsafe {
            gl::DeleteVertexArrays(1, &self.id);
        })
    }
}

impl VertexArray {
    pub fn new() -> Self {
        let mut id = 0;
        check!(unsafe {
            gl::GenVertexArrays(1, &mut id);
        });

        Self {
            id,
            vertex_buffers: Vec::new(),
            index_buffer: None,
            components_per_vertex: 0,
        }
    }

    pub fn bind(&self) {
        check!(unsafe {
            gl::BindVertexArray(self.id);
        })
    }

    pub fn unbind(&self) {
        check!(unsafe {
            gl::BindVertexArray(0);
        })
    }

    /// Attaches `buffer` to this array without describing any attribute.
    ///
    /// An element array buffer replaces the index buffer; an array buffer
    /// becomes the source for the next [`VertexArray::apply_layout`].
    pub fn assign_buffer(&mut self, buffer: Buffer) {
        self.bind();
        buffer.bind();

        match buffer.buffer_type() {
            BufferType::ElementArray => self.index_buffer = Some(buffer),
            BufferType::Array => self.vertex_buffers.push(buffer),
        }
    }

    /// Points attribute `index` at a tightly packed array buffer.
    pub fn enable_attribute(&mut self, index: u32, buffer: Buffer) {
        debug_assert_eq!(buffer.buffer_type(), BufferType::Array);

        self.bind();
        buffer.bind();

        check!(unsafe {
            gl::EnableVertexAttribArray(index);
            gl::VertexAttribPointer(
                index,
                buffer.components() as i32,
                buffer.element_type() as u32,
                gl::FALSE,
                0,
                std::ptr::null(),
            );
        });

        if self.vertex_buffers.is_empty() {
            self.components_per_vertex = buffer.components();
        }
        self.vertex_buffers.push(buffer);
    }

    /// Describes the most recently assigned array buffer as interleaved
    /// vertices, one attribute per layout element starting at index 0.
    pub fn apply_layout(&mut self, layout: &VertexBufferLayout) {
        let source = match self.vertex_buffers.last() {
            Some(buffer) => buffer,
            None => {
                log::warn!("vertex array {} has no buffer to lay out", self.id);
                return;
            }
        };

        self.bind();
        source.bind();

        for (idx, (element, offset)) in layout
            .elements()
            .iter()
            .zip(layout.offsets())
            .enumerate()
        {
            check!(unsafe {
                gl::EnableVertexAttribArray(idx as u32);
                gl::VertexAttribPointer(
                    idx as u32,
                    element.count as i32,
                    element.ty as u32,
                    element.normalized as u8,
                    layout.stride as i32,
                    offset as usize as *const _,
                );
            });
        }

        self.components_per_vertex = layout.components_per_vertex();
    }

    /// Number of vertices to draw when no index buffer is attached.
    pub fn vertex_count(&self) -> u32 {
        match (self.vertex_buffers.first(), self.components_per_vertex) {
            (Some(buffer), per_vertex) if per_vertex > 0 => buffer.scalar_count() / per_vertex,
            _ => 0,
        }
    }

    pub fn draw(&self, mode: DrawMode) {
        self.bind();

        match &self.index_buffer {
            Some(indices) => {
                indices.bind();
                check!(unsafe {
                    gl::DrawElements(
                        mode as u32,
                        indices.count() as i32,
                        indices.element_type() as u32,
                        std::ptr::null(),
                    )
                });
            }
            None => check!(unsafe { gl::DrawArrays(mode as u32, 0, self.vertex_count() as i32) }),
        }
    }
}
