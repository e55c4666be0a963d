/// CPU staging for the per-frame constant ring.
///
/// Each discard-write appends a new slot starting at a multiple of the
/// device's dynamic-offset alignment. The whole ring is uploaded once per
/// frame and cleared after present.
#[derive(Debug)]
pub(crate) struct ConstantRing {
    alignment: u64,
    staging: Vec<u8>,
}

impl ConstantRing {
    pub(crate) fn new(alignment: u32) -> Self {
        Self {
            alignment: u64::from(alignment.max(1)),
            staging: Vec::new(),
        }
    }

    /// Append `data` in a slot of `slot_size` bytes, zero-padded, and
    /// return the slot's offset.
    pub(crate) fn push(&mut self, data: &[u8], slot_size: u64) -> u64 {
        let offset = align_up(self.staging.len() as u64, self.alignment);
        let end = offset + slot_size.max(data.len() as u64);
        self.staging.resize(offset as usize, 0);
        self.staging.extend_from_slice(data);
        self.staging.resize(end as usize, 0);
        offset
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        &self.staging
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.staging.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.staging.clear();
    }
}

pub(crate) fn align_up(value: u64, alignment: u64) -> u64 {
    value.div_ceil(alignment) * alignment
}
