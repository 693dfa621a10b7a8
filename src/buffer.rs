use std::mem;

use nalgebra::{Vector2, Vector3};

use crate::check;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferType {
    Array = gl::ARRAY_BUFFER,
    ElementArray = gl::ELEMENT_ARRAY_BUFFER,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    StaticDraw = gl::STATIC_DRAW,
    DynamicDraw = gl::DYNAMIC_DRAW,
    StreamDraw = gl::STREAM_DRAW,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferElementType {
    Float = gl::FLOAT,
    UnsignedInt = gl::UNSIGNED_INT,
}

impl BufferElementType {
    pub fn size_of(&self) -> usize {
        match self {
            Self::Float => mem::size_of::<f32>(),
            Self::UnsignedInt => mem::size_of::<u32>(),
        }
    }
}

/// Anything that can be uploaded as a tightly packed buffer element.
///
/// # Safety
///
/// Buffers are filled straight from the memory of a `&[Self]`, so the type
/// must consist of exactly `COMPONENTS` scalars of `ELEMENT_TYPE` with no
/// padding, and `size_of::<Self>()` must equal
/// `COMPONENTS * ELEMENT_TYPE.size_of()`.
pub unsafe trait BufferElement: Copy {
    /// Scalars per element, e.g. 3 for a position.
    const COMPONENTS: u32;
    const ELEMENT_TYPE: BufferElementType;
}

unsafe impl BufferElement for f32 {
    const COMPONENTS: u32 = 1;
    const ELEMENT_TYPE: BufferElementType = BufferElementType::Float;
}

unsafe impl BufferElement for u32 {
    const COMPONENTS: u32 = 1;
    const ELEMENT_TYPE: BufferElementType = BufferElementType::UnsignedInt;
}

unsafe impl BufferElement for Vector2<f32> {
    const COMPONENTS: u32 = 2;
    const ELEMENT_TYPE: BufferElementType = BufferElementType::Float;
}

unsafe impl BufferElement for Vector3<f32> {
    const COMPONENTS: u32 = 3;
    const ELEMENT_TYPE: BufferElementType = BufferElementType::Float;
}

#[derive(Debug)]
pub struct Buffer {
    id: u32,
    ty: BufferType,
    count: u32,
    components: u32,
    element_type: BufferElementType,
}

impl Buffer {
    pub fn new<T: BufferElement>(ty: BufferType, usage: Usage, data: &[T]) -> Self {
        let mut id = 0;
        unsafe {
            check!(gl::GenBuffers(1, &mut id));
            check!(gl::BindBuffer(ty as u32, id));
            check!(gl::BufferData(
                ty as u32,
                mem::size_of_val(data) as isize,
                data.as_ptr() as *const _,
                usage as u32,
            ));
        }

        log::debug!(
            "buffer {} holds {} elements of {} component(s)",
            id,
            data.len(),
            T::COMPONENTS
        );

        Buffer {
            id,
            ty,
            count: data.len() as u32,
            components: T::COMPONENTS,
            element_type: T::ELEMENT_TYPE,
        }
    }

    pub fn bind(&self) {
        check!(unsafe { gl::BindBuffer(self.ty as u32, self.id) })
    }

    pub fn unbind(&self) {
        check!(unsafe { gl::BindBuffer(self.ty as u32, 0) })
    }

    pub fn buffer_type(&self) -> BufferType {
        self.ty
    }

    /// Number of elements, not scalars.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn element_type(&self) -> BufferElementType {
        self.element_type
    }

    /// Total number of scalars stored.
    pub fn scalar_count(&self) -> u32 {
        self.count * self.components
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        check!(unsafe {
            gl::DeleteBuffers(1, &self.id);
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferElement {
    pub count: u32,
    pub ty: BufferElementType,
    pub normalized: bool,
}

/// Interleaved vertex layout, one entry per attribute.
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    pub stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        VertexBufferLayout {
            elements: Vec::new(),
            stride: 0,
        }
    }

    pub fn push(&mut self, ty: BufferElementType, count: u32, normalized: bool) {
        self.stride += ty.size_of() as u32 * count;
        self.elements.push(VertexBufferElement {
            count,
            ty,
            normalized,
        });
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Scalars per vertex across all attributes.
    pub fn components_per_vertex(&self) -> u32 {
        self.elements.iter().map(|element| element.count).sum()
    }

    /// Byte offset of every attribute inside one vertex.
    pub fn offsets(&self) -> Vec<u32> {
        self.elements
            .iter()
            .scan(0, |offset, element| {
                let current = *offset;
                *offset += element.count * element.ty.size_of() as u32;
                Some(current)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_accumulates_stride() {
        let mut layout = VertexBufferLayout::new();
        layout.push(BufferElementType::Float, 3, false);
        layout.push(BufferElementType::Float, 3, false);
        layout.push(BufferElementType::Float, 2, false);

        assert_eq!(layout.stride, 32);
        assert_eq!(layout.components_per_vertex(), 8);
        assert_eq!(layout.offsets(), vec![0, 12, 24]);
    }

    #[test]
    fn test_empty_layout() {
        let layout = VertexBufferLayout::new();

        assert_eq!(layout.stride, 0);
        assert!(layout.elements().is_empty());
        assert!(layout.offsets().is_empty());
    }

    #[test]
    fn test_element_metadata() {
        assert_eq!(<f32 as BufferElement>::COMPONENTS, 1);
        assert_eq!(<u32 as BufferElement>::ELEMENT_TYPE, BufferElementType::UnsignedInt);
        assert_eq!(<Vector2<f32> as BufferElement>::COMPONENTS, 2);
        assert_eq!(<Vector3<f32> as BufferElement>::COMPONENTS, 3);
        assert_eq!(
            mem::size_of::<Vector3<f32>>(),
            3 * BufferElementType::Float.size_of()
        );
    }

    fn packed_size<T: BufferElement>() -> usize {
        T::COMPONENTS as usize * T::ELEMENT_TYPE.size_of()
    }

    #[test]
    fn test_elements_are_tightly_packed() {
        assert_eq!(mem::size_of::<f32>(), packed_size::<f32>());
        assert_eq!(mem::size_of::<u32>(), packed_size::<u32>());
        assert_eq!(mem::size_of::<Vector2<f32>>(), packed_size::<Vector2<f32>>());
        assert_eq!(mem::size_of::<Vector3<f32>>(), packed_size::<Vector3<f32>>());

        let positions = [Vector3::new(0.0_f32, 1.0, 2.0); 4];
        assert_eq!(
            mem::size_of_val(&positions[..]),
            positions.len() * packed_size::<Vector3<f32>>()
        );
    }
}
