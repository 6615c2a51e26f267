//! Growable GPU buffers.
//!
//! The particle cloud is regenerated when its count or radius changes; the
//! storage buffer behind it grows with a 2x strategy and never shrinks.

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// Smallest allocation, so an empty upload still yields a bindable buffer.
const MIN_CAPACITY: usize = 64;

/// A GPU buffer of `T` items that reallocates when an upload exceeds its
/// capacity.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    capacity_bytes: usize,
    len_bytes: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer initialized from existing data.
    #[must_use]
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let capacity_bytes = bytes.len().max(MIN_CAPACITY);

        let buffer = if bytes.len() >= MIN_CAPACITY {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
        } else {
            let mut padded = bytes.to_vec();
            padded.resize(MIN_CAPACITY, 0);
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: &padded,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            })
        };

        Self {
            buffer,
            capacity_bytes,
            len_bytes: bytes.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary.
    ///
    /// Returns `true` if buffer was reallocated (bind groups need recreation)
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = bytes.len();

        let reallocated = if needed > self.capacity_bytes {
            let new_capacity = grown_capacity(self.capacity_bytes, needed);
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            log::debug!(
                "{}: grew {} -> {} bytes",
                self.label,
                self.capacity_bytes,
                new_capacity
            );
            self.capacity_bytes = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len_bytes = needed;

        reallocated
    }

    /// The underlying `wgpu::Buffer`.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Number of items last written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len_bytes / size_of::<T>()
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len_bytes == 0
    }
}

/// 2x growth, minimum 1KB over the current capacity.
fn grown_capacity(current: usize, needed: usize) -> usize {
    (needed * 2).max(current + 1024)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_at_least_doubles_request() {
        assert_eq!(grown_capacity(64, 100), 1088);
        assert_eq!(grown_capacity(1024, 96_000), 192_000);
    }
}
