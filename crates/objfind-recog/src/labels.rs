//! Ground-truth labels
//!
//! A label set maps object identity keys, the `(x, y)` position of an
//! object's first run, to a user-assigned label such as a character code.
//! Labels survive re-extraction as long as the image and preprocessing are
//! unchanged, because the first run of an object does not move.

use crate::error::{RecogError, RecogResult};
use objfind_region::{Object, ObjectKey};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Labels keyed by object identity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: BTreeMap<ObjectKey, u32>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `label` for the object whose first run starts at `(x, y)`.
    ///
    /// Returns the label previously stored for that key, if any.
    pub fn insert(&mut self, x: i32, y: i32, label: u32) -> Option<u32> {
        self.labels.insert(ObjectKey { x, y }, label)
    }

    /// Label of `obj`, joined by its identity key.
    pub fn label_for(&self, obj: &Object) -> Option<u32> {
        obj.key().and_then(|k| self.labels.get(&k).copied())
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check whether the set holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(key, label)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, u32)> + '_ {
        self.labels.iter().map(|(&k, &v)| (k, v))
    }

    /// Read labels from text, one `x,y,label` record per line.
    ///
    /// Fields may also be separated by whitespace. Blank lines and lines
    /// starting with `#` are skipped. A label given as a single
    /// non-numeric character is stored as its code point.
    ///
    /// ```
    /// use objfind_recog::LabelSet;
    ///
    /// let set = LabelSet::from_reader("# x,y,label\n3,0,65\n7 2 b\n".as_bytes()).unwrap();
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> RecogResult<Self> {
        let mut set = Self::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (x, y, label) = parse_record(line).map_err(|message| RecogError::InvalidLabel {
                line: i + 1,
                message,
            })?;
            set.insert(x, y, label);
        }
        Ok(set)
    }
}

fn parse_record(line: &str) -> Result<(i32, i32, u32), String> {
    let fields: Vec<&str> = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();
    let [x, y, label] = fields.as_slice() else {
        return Err(format!("expected 3 fields, found {}", fields.len()));
    };
    let x = x.parse().map_err(|_| format!("bad x coordinate {x:?}"))?;
    let y = y.parse().map_err(|_| format!("bad y coordinate {y:?}"))?;
    let label = match label.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c as u32,
                _ => return Err(format!("bad label {label:?}")),
            }
        }
    };
    Ok((x, y, label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use objfind_region::find_objects;
    use objfind_test::raster_from_rows;

    #[test]
    fn test_join_by_first_run() {
        let pix = raster_from_rows(&["..1", ".11", "22."]).unwrap();
        let objs = find_objects(&pix).unwrap();

        let mut set = LabelSet::new();
        set.insert(2, 0, 'x' as u32);
        set.insert(0, 2, 'y' as u32);
        assert_eq!(set.insert(0, 2, 'z' as u32), Some('y' as u32));

        let one = objs.iter().find(|o| o.color == 1).unwrap();
        let two = objs.iter().find(|o| o.color == 2).unwrap();
        let zero = objs.iter().find(|o| o.color == 0).unwrap();
        assert_eq!(set.label_for(one), Some('x' as u32));
        assert_eq!(set.label_for(two), Some('z' as u32));
        assert_eq!(set.label_for(zero), None);
        assert_eq!(set.label_for(&Object::new(0)), None);
    }

    #[test]
    fn test_from_reader() {
        let text = "\n# comment\n1,2,65\n  4\t5\tq \n";
        let set = LabelSet::from_reader(text.as_bytes()).unwrap();
        let entries: Vec<_> = set.iter().collect();
        assert_eq!(
            entries,
            vec![
                (ObjectKey { x: 1, y: 2 }, 65),
                (ObjectKey { x: 4, y: 5 }, 'q' as u32),
            ]
        );
    }

    #[test]
    fn test_from_reader_errors() {
        let err = LabelSet::from_reader("1,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RecogError::InvalidLabel { line: 1, .. }));
        let err = LabelSet::from_reader("0,0,1\nx,2,3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RecogError::InvalidLabel { line: 2, .. }));
        assert!(LabelSet::from_reader("1,2,ab\n".as_bytes()).is_err());
    }
}
