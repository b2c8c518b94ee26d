//! Dense array projections of a [`NestedMap`].
//!
//! Axis `k` of a projected array is the `k`-th level of nesting. In the
//! positional projection the index along an axis is the child's insertion
//! position among its siblings; in the labeled projection it is the position
//! of the child's key in that axis' label list.
//!
//! Both projections run a shape pass before anything is allocated. A
//! hierarchy whose siblings disagree on shape is rejected with
//! [`Error::IrregularStructure`] unless a fill value is supplied for the
//! holes. Siblings that disagree on the number of nesting levels are always
//! rejected.

use indexmap::{IndexMap, IndexSet};
use ndarray::{ArrayD, IxDyn};
use tracing::{debug, trace};

use crate::{AsKey, Error, Irregularity, Key, NestedMap, Node, Result, Scalar, cold_path};

/// A dense array together with the key of every index along every axis.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledArray {
    array: ArrayD<Scalar>,
    axes: Vec<IndexMap<Key, usize>>,
}

impl LabeledArray {
    #[inline]
    pub fn array(&self) -> &ArrayD<Scalar> {
        &self.array
    }

    /// Per axis, the mapping from key to index.
    #[inline]
    pub fn axes(&self) -> &[IndexMap<Key, usize>] {
        &self.axes
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.array.shape()
    }

    #[inline]
    pub fn into_parts(self) -> (ArrayD<Scalar>, Vec<IndexMap<Key, usize>>) {
        (self.array, self.axes)
    }

    /// The labels of `axis` in index order.
    pub fn labels(&self, axis: usize) -> Option<impl Iterator<Item = &Key>> {
        self.axes.get(axis).map(|labels| labels.keys())
    }

    pub fn label_index(&self, axis: usize, key: impl AsKey) -> Option<usize> {
        self.axes.get(axis)?.get(&key.as_key()).copied()
    }

    /// Looks a cell up by one key per axis.
    pub fn get<K: AsKey>(&self, keys: &[K]) -> Option<&Scalar> {
        if keys.len() != self.axes.len() {
            return None;
        }
        let index = keys
            .iter()
            .enumerate()
            .map(|(axis, key)| self.label_index(axis, key))
            .collect::<Option<Vec<_>>>()?;
        self.array.get(IxDyn(&index))
    }
}

impl NestedMap {
    /// The shape of the dense projection.
    ///
    /// With `pad` set, siblings of differing shape are reconciled by taking
    /// the element-wise maximum; otherwise they are an error.
    pub fn shape(&self, pad: bool) -> Result<Vec<usize>> {
        shape_of(self, &mut Vec::new(), pad)
    }

    /// Projects the hierarchy into a dense array.
    ///
    /// Positions without a leaf hold `fill`. Without a fill value the
    /// hierarchy must be rectangular.
    ///
    /// # Example
    ///
    /// ```
    /// use nested_dict::{IxDyn, NestedMap, Scalar};
    ///
    /// let mut map = NestedMap::new();
    /// map.at("c").at("d").set(4);
    /// map.at("v").at("d").set(7);
    /// map.at("v").at("e").set(8);
    ///
    /// assert!(map.to_array(None).is_err());
    /// let array = map.to_array(Some(Scalar::Int(0))).unwrap();
    /// assert_eq!(array.shape(), &[2, 2]);
    /// assert_eq!(array[IxDyn(&[0, 1])], Scalar::Int(0));
    /// ```
    pub fn to_array(&self, fill: Option<Scalar>) -> Result<ArrayD<Scalar>> {
        self.to_array_with(fill, Scalar::clone)
    }

    /// Like [`to_array`](NestedMap::to_array), mapping every leaf through `f`.
    pub fn to_array_with<T, F>(&self, fill: Option<T>, mut f: F) -> Result<ArrayD<T>>
    where
        T: Clone,
        F: FnMut(&Scalar) -> T,
    {
        let shape = self.shape(fill.is_some())?;
        debug!(?shape, padded = fill.is_some(), "projecting nested map");
        match fill {
            // A regular shape has exactly one leaf per cell, met in row-major order.
            None => {
                let mut cells = Vec::with_capacity(shape.iter().product());
                self.visit_leaves(&mut Vec::new(), &mut |_, value| cells.push(f(value)));
                Ok(ArrayD::from_shape_vec(IxDyn(&shape), cells)?)
            }
            Some(fill) => {
                let mut array = ArrayD::from_elem(IxDyn(&shape), fill);
                fill_positional(self, &mut array, &mut Vec::new(), &mut f);
                Ok(array)
            }
        }
    }

    /// [`to_array`](NestedMap::to_array) as floats; non-numeric leaves are `NaN`.
    pub fn to_f64_array(&self, fill: Option<f64>) -> Result<ArrayD<f64>> {
        self.to_array_with(fill, |value| value.as_f64().unwrap_or(f64::NAN))
    }

    /// Projects the hierarchy into a dense array indexed by key.
    ///
    /// Axis `k` is labeled with every key seen at depth `k`, in first-seen
    /// depth-first order. Without a fill value every branch at a depth must
    /// hold exactly the keys of that axis.
    pub fn to_labeled_array(&self, fill: Option<Scalar>) -> Result<LabeledArray> {
        let rank = self.shape(fill.is_some())?.len();

        let mut labels = vec![IndexSet::new(); rank];
        collect_labels(self, 0, &mut labels);
        if fill.is_none() {
            check_labels(self, 0, &labels, &mut Vec::new())?;
        }

        let shape = labels.iter().map(IndexSet::len).collect::<Vec<_>>();
        debug!(?shape, padded = fill.is_some(), "projecting nested map with labels");

        // Without a fill value every cell is written below.
        let mut array = ArrayD::from_elem(IxDyn(&shape), fill.unwrap_or_default());
        fill_labeled(self, &labels, &mut array, &mut Vec::new(), &mut Vec::new())?;

        let axes = labels
            .into_iter()
            .map(|keys| {
                keys.into_iter()
                    .enumerate()
                    .map(|(index, key)| (key, index))
                    .collect()
            })
            .collect();
        Ok(LabeledArray { array, axes })
    }
}

fn shape_of<'a>(map: &'a NestedMap, path: &mut Vec<&'a Key>, pad: bool) -> Result<Vec<usize>> {
    let mut common: Option<Vec<usize>> = None;
    for (key, node) in map {
        let shape = match node {
            Node::Leaf(_) => Vec::new(),
            Node::Branch(child) => {
                path.push(key);
                let shape = shape_of(child, path, pad)?;
                path.pop();
                shape
            }
        };
        common = Some(match common {
            None => shape,
            Some(common) if common == shape => common,
            Some(common) => {
                if common.len() != shape.len() {
                    cold_path();
                    return Err(Error::irregular(path, Irregularity::Rank));
                }
                if !pad {
                    cold_path();
                    return Err(Error::irregular(path, Irregularity::Shape));
                }
                trace!(depth = path.len(), ?common, ?shape, "padding sibling shapes");
                common.iter().zip(&shape).map(|(a, b)| *a.max(b)).collect()
            }
        });
    }
    let mut shape = vec![map.len()];
    shape.extend(common.unwrap_or_default());
    Ok(shape)
}

fn fill_positional<T>(
    map: &NestedMap,
    array: &mut ArrayD<T>,
    index: &mut Vec<usize>,
    f: &mut impl FnMut(&Scalar) -> T,
) {
    for (position, node) in map.values().enumerate() {
        index.push(position);
        match node {
            Node::Leaf(value) => array[IxDyn(index)] = f(value),
            Node::Branch(child) => fill_positional(child, array, index, f),
        }
        index.pop();
    }
}

fn collect_labels(map: &NestedMap, depth: usize, labels: &mut [IndexSet<Key>]) {
    for (key, node) in map {
        labels[depth].insert(key.clone());
        if let Node::Branch(child) = node {
            collect_labels(child, depth + 1, labels);
        }
    }
}

fn check_labels<'a>(
    map: &'a NestedMap,
    depth: usize,
    labels: &[IndexSet<Key>],
    path: &mut Vec<&'a Key>,
) -> Result<()> {
    let axis = &labels[depth];
    if map.len() != axis.len() || !map.keys().all(|key| axis.contains(key)) {
        cold_path();
        return Err(Error::irregular(path, Irregularity::Labels));
    }
    for (key, node) in map {
        if let Node::Branch(child) = node {
            path.push(key);
            check_labels(child, depth + 1, labels, path)?;
            path.pop();
        }
    }
    Ok(())
}

fn fill_labeled<'a>(
    map: &'a NestedMap,
    labels: &[IndexSet<Key>],
    array: &mut ArrayD<Scalar>,
    index: &mut Vec<usize>,
    path: &mut Vec<&'a Key>,
) -> Result<()> {
    let depth = index.len();
    for (key, node) in map {
        let Some(position) = labels[depth].get_index_of(key) else {
            cold_path();
            return Err(Error::irregular(path, Irregularity::Labels));
        };
        index.push(position);
        path.push(key);
        match node {
            Node::Leaf(value) => array[IxDyn(index)] = value.clone(),
            Node::Branch(child) => fill_labeled(child, labels, array, index, path)?,
        }
        path.pop();
        index.pop();
    }
    Ok(())
}
