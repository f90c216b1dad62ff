use std::fmt;

use crate::position::{position, Position, LIST_OFFSET};
use crate::traits::Decodable;
use crate::value::Value;
use crate::{DecoderError, RlpIterator};

/// Borrowed view over one encoded value.
///
/// An item never owns storage; sub-items are slices of the same buffer.
/// The empty view stands for an absent value and reads as zero, an empty
/// byte string, or an empty list.
#[derive(Clone, Copy, Default)]
pub struct RlpItem<'a> {
    bytes: &'a [u8],
}

impl<'a> RlpItem<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        RlpItem { bytes }
    }

    pub fn empty() -> Self {
        RlpItem { bytes: &[] }
    }

    /// Views the first complete item in `bytes`, ignoring anything after it.
    pub fn first(bytes: &'a [u8]) -> Result<Self, DecoderError> {
        let pos = position(bytes)?;
        Ok(RlpItem::new(&bytes[..pos.total()]))
    }

    /// Encoded bytes of the item, header included.
    pub fn as_raw(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// First byte; `None` for the empty item.
    pub fn prefix(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    pub fn is_list(&self) -> bool {
        matches!(self.prefix(), Some(prefix) if prefix >= LIST_OFFSET)
    }

    pub fn is_data(&self) -> bool {
        matches!(self.prefix(), Some(prefix) if prefix < LIST_OFFSET)
    }

    pub fn position(&self) -> Result<Position, DecoderError> {
        position(self.bytes)
    }

    /// Header length.
    pub fn offset(&self) -> Result<usize, DecoderError> {
        Ok(self.position()?.offset)
    }

    /// Payload length.
    pub fn length(&self) -> Result<usize, DecoderError> {
        Ok(self.position()?.length)
    }

    pub fn payload(&self) -> Result<&'a [u8], DecoderError> {
        let pos = self.position()?;
        Ok(&self.bytes[pos.offset..pos.total()])
    }

    /// Number of direct children. Walks the whole payload; zero for data items.
    pub fn items_size(&self) -> Result<usize, DecoderError> {
        Ok(self.split_list()?.len())
    }

    pub fn sub_item(&self, index: usize) -> Result<RlpItem<'a>, DecoderError> {
        let items = self.split_list()?;
        let len = items.len();
        items
            .into_iter()
            .nth(index)
            .ok_or(DecoderError::IndexOutOfRange { index, len })
    }

    /// Iterates the direct children of a list. Data items have none.
    pub fn iter(&self) -> Result<RlpIterator<'a>, DecoderError> {
        if self.is_list() {
            Ok(RlpIterator::new(self.payload()?))
        } else {
            Ok(RlpIterator::new(&[]))
        }
    }

    /// Decodes into `target`; the variant already held by `target` picks the
    /// decoding rule.
    pub fn to_value(&self, target: &mut Value) -> Result<(), DecoderError> {
        target.decode_from(self)
    }

    pub fn as_val<T: Decodable>(&self) -> Result<T, DecoderError> {
        T::decode(self)
    }

    /// Decodes children into the pre-sized `dest`, element by element.
    ///
    /// Stops at whichever runs out first. Slots without a matching child are
    /// left untouched and extra children are ignored. Returns the number of
    /// slots written.
    pub fn decode_into<T: Decodable>(&self, dest: &mut [T]) -> Result<usize, DecoderError> {
        if !self.is_list() && !self.is_empty() {
            return Err(DecoderError::TypeMismatch {
                expected: "list",
                found: "data",
            });
        }

        let mut written = 0;
        for (slot, child) in dest.iter_mut().zip(self.split_list()?) {
            *slot = T::decode(&child)?;
            written += 1;
        }
        Ok(written)
    }

    /// True when both views cover the same bytes of the same buffer.
    pub fn same_storage(&self, other: &RlpItem<'_>) -> bool {
        std::ptr::eq(self.bytes.as_ptr(), other.bytes.as_ptr()) && self.size() == other.size()
    }

    fn split_list(&self) -> Result<Vec<RlpItem<'a>>, DecoderError> {
        let mut items = Vec::new();
        if !self.is_list() {
            return Ok(items);
        }

        let mut rest = self.payload()?;
        while !rest.is_empty() {
            let total = position(rest)?.total();
            let (item, tail) = rest.split_at(total);
            items.push(RlpItem::new(item));
            rest = tail;
        }
        Ok(items)
    }
}

/// Compares encoded bytes, not storage location.
impl PartialEq for RlpItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for RlpItem<'_> {}

impl<'a> From<&'a [u8]> for RlpItem<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        RlpItem::new(bytes)
    }
}

impl fmt::Debug for RlpItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RlpItem(0x")?;
        for byte in self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT_DOG: [u8; 9] = [0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];

    #[test]
    fn test_classification() {
        assert!(RlpItem::new(&[0xc0]).is_list());
        assert!(RlpItem::new(&[0x80]).is_data());
        assert!(RlpItem::new(&[0x05]).is_data());
        assert!(!RlpItem::empty().is_list());
        assert!(!RlpItem::empty().is_data());
        assert_eq!(RlpItem::empty().prefix(), None);
        assert_eq!(RlpItem::new(&CAT_DOG).prefix(), Some(0xc8));
    }

    #[test]
    fn test_payload() {
        let item = RlpItem::new(&[0x83, b'd', b'o', b'g']);
        assert_eq!(item.payload().unwrap(), b"dog");
        assert_eq!(item.offset().unwrap(), 1);
        assert_eq!(item.length().unwrap(), 3);

        assert!(RlpItem::empty().payload().unwrap().is_empty());
        assert_eq!(RlpItem::new(&[0x41]).payload().unwrap(), &[0x41]);
    }

    #[test]
    fn test_sub_items() {
        let list = RlpItem::new(&CAT_DOG);
        assert_eq!(list.items_size().unwrap(), 2);
        assert_eq!(list.sub_item(0).unwrap().as_raw(), &CAT_DOG[1..5]);
        assert_eq!(list.sub_item(1).unwrap().payload().unwrap(), b"dog");
    }

    #[test]
    fn test_sub_item_is_a_slice() {
        let data = CAT_DOG;
        let list = RlpItem::new(&data);
        let dog = list.sub_item(1).unwrap();
        assert!(std::ptr::eq(dog.as_raw().as_ptr(), data[5..].as_ptr()));
    }

    #[test]
    fn test_sub_item_out_of_range() {
        let list = RlpItem::new(&CAT_DOG);
        assert_eq!(
            list.sub_item(2),
            Err(DecoderError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            RlpItem::new(&[0x05]).sub_item(0),
            Err(DecoderError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_data_item_has_no_children() {
        assert_eq!(RlpItem::new(&[0x83, b'c', b'a', b't']).items_size().unwrap(), 0);
        assert_eq!(RlpItem::empty().items_size().unwrap(), 0);
    }

    #[test]
    fn test_truncated_child() {
        // list claims 3 payload bytes, child claims 5
        let data = [0xc3, 0x85, 0x01, 0x02];
        assert!(matches!(
            RlpItem::new(&data).items_size(),
            Err(DecoderError::Truncated { .. })
        ));
    }

    #[test]
    fn test_first_ignores_trailing() {
        let data = [0x01, 0x02, 0x03];
        let item = RlpItem::first(&data).unwrap();
        assert_eq!(item.as_raw(), &[0x01]);
    }

    #[test]
    fn test_equality_is_by_content() {
        let a = [0x82, 0x01, 0x02];
        let b = a;
        let left = RlpItem::new(&a);
        let right = RlpItem::new(&b);

        assert_eq!(left, right);
        assert!(!left.same_storage(&right));
        assert!(left.same_storage(&RlpItem::new(&a)));
    }

    #[test]
    fn test_decode_into_partial_fill() {
        let data = [0xc3, 0x01, 0x02, 0x03];
        let item = RlpItem::new(&data);

        let mut short = [0u8; 2];
        assert_eq!(item.decode_into(&mut short).unwrap(), 2);
        assert_eq!(short, [1, 2]);

        let mut long = [9u8; 5];
        assert_eq!(item.decode_into(&mut long).unwrap(), 3);
        assert_eq!(long, [1, 2, 3, 9, 9]);
    }

    #[test]
    fn test_decode_into_rejects_data() {
        let mut dest = [0u64; 1];
        assert!(matches!(
            RlpItem::new(&[0x05]).decode_into(&mut dest),
            Err(DecoderError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", RlpItem::new(&[0xc1, 0x0a])), "RlpItem(0xc10a)");
    }
}
