use crate::position::position;
use crate::{DecoderError, RlpItem};

/// Forward cursor over concatenated top-level items.
///
/// Items are produced lazily, one position computation per step. There is
/// no rewind; build a new iterator over the same bytes to start over.
#[derive(Debug, Clone)]
pub struct RlpIterator<'a> {
    data: &'a [u8],
    cursor: usize,
    current: Option<RlpItem<'a>>,
    done: bool,
}

impl<'a> RlpIterator<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        RlpIterator {
            data,
            cursor: 0,
            current: None,
            done: data.is_empty(),
        }
    }

    /// Moves to the next item. Returns `false` once the bytes are exhausted.
    ///
    /// A malformed item ends the iteration after reporting the error.
    pub fn advance(&mut self) -> Result<bool, DecoderError> {
        if self.done {
            return Ok(false);
        }

        let rest = self.remaining();
        if rest.is_empty() {
            self.done = true;
            self.current = None;
            return Ok(false);
        }

        let total = match position(rest) {
            Ok(pos) => pos.total(),
            Err(e) => {
                tracing::debug!(cursor = self.cursor, error = %e, "stopping rlp iteration");
                self.done = true;
                self.current = None;
                return Err(e);
            }
        };

        self.current = Some(RlpItem::new(&rest[..total]));
        self.cursor += total;
        tracing::trace!(cursor = self.cursor, total, "advanced rlp iterator");
        Ok(true)
    }

    /// Most recently produced item.
    pub fn current(&self) -> Option<RlpItem<'a>> {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Bytes after the current item.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.cursor..]
    }
}

impl<'a> TryFrom<RlpItem<'a>> for RlpIterator<'a> {
    type Error = DecoderError;

    /// Walks the children of a list item, or the raw bytes of a data item.
    fn try_from(item: RlpItem<'a>) -> Result<Self, Self::Error> {
        if item.is_list() {
            Ok(RlpIterator::new(item.payload()?))
        } else {
            Ok(RlpIterator::new(item.as_raw()))
        }
    }
}

impl<'a> Iterator for RlpIterator<'a> {
    type Item = Result<RlpItem<'a>, DecoderError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.advance() {
            Ok(true) => self.current.map(Ok),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

impl std::iter::FusedIterator for RlpIterator<'_> {}

impl PartialEq for RlpIterator<'_> {
    fn eq(&self, other: &Self) -> bool {
        if self.done && other.done {
            return true;
        }
        self.done == other.done
            && std::ptr::eq(self.data.as_ptr(), other.data.as_ptr())
            && self.data.len() == other.data.len()
            && self.cursor == other.cursor
            && match (&self.current, &other.current) {
                (Some(a), Some(b)) => a.same_storage(b),
                (None, None) => true,
                _ => false,
            }
    }
}
