//! Shared object handles and their property storage.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use indexmap::IndexMap;
use tracing::trace;

use super::{Value, WriteOnce};

bitflags! {
    /// Attribute bits carried by every own property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyFlags: u8 {
        /// The value can be reassigned.
        const WRITABLE = 0b001;
        /// The property can be deleted and its flags changed.
        const CONFIGURABLE = 0b010;
        /// The property is listed by `keys`, `entries` and `values`.
        const ENUMERABLE = 0b100;
    }
}

impl Default for PropertyFlags {
    fn default() -> Self {
        PropertyFlags::all()
    }
}

/// Sequential iteration capability, drained eagerly by [`crate::array`].
pub trait Iterable {
    /// Returns a fresh iterator over the items.
    fn iterate(&self) -> Box<dyn Iterator<Item = Value>>;
}

impl<F, I> Iterable for F
where
    F: Fn() -> I,
    I: IntoIterator<Item = Value>,
    I::IntoIter: 'static,
{
    fn iterate(&self) -> Box<dyn Iterator<Item = Value>> {
        Box::new(self().into_iter())
    }
}

/// One result of a pull-based iterator.
#[derive(Debug, Clone, Default)]
pub struct Step {
    pub value: Value,
    pub done: bool,
}

impl Step {
    /// A step carrying a value.
    pub fn next(value: impl Into<Value>) -> Self {
        Step {
            value: value.into(),
            done: false,
        }
    }

    /// The terminal step.
    pub fn done() -> Self {
        Step {
            value: Value::Undefined,
            done: true,
        }
    }
}

/// Pull-based iteration capability: repeated calls to `next` until a step is done.
pub trait PullIterator {
    fn next(&mut self) -> Step;
}

impl<F> PullIterator for F
where
    F: FnMut() -> Step,
{
    fn next(&mut self) -> Step {
        self()
    }
}

/// Call capability of a function object.
pub trait Callable {
    fn call(&self, args: &[Value]) -> Value;
}

impl<F> Callable for F
where
    F: Fn(&[Value]) -> Value,
{
    fn call(&self, args: &[Value]) -> Value {
        self(args)
    }
}

/// ObjectKind distinguishes the closed set of object shapes.
///
/// Only `Plain` is a native plain map and takes part in recursive merge and
/// reduce. `Function` objects carry properties but are not composites.
#[derive(Clone)]
pub enum ObjectKind {
    Plain,
    Array,
    Branded(String),
    Iterable(Rc<dyn Iterable>),
    Iterator(Rc<RefCell<dyn PullIterator>>),
    Function(Rc<dyn Callable>),
}

impl ObjectKind {
    fn is_array(&self) -> bool {
        matches!(self, ObjectKind::Array)
    }
}

impl fmt::Debug for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Plain => f.write_str("Plain"),
            ObjectKind::Array => f.write_str("Array"),
            ObjectKind::Branded(brand) => f.debug_tuple("Branded").field(brand).finish(),
            ObjectKind::Iterable(_) => f.write_str("Iterable"),
            ObjectKind::Iterator(_) => f.write_str("Iterator"),
            ObjectKind::Function(_) => f.write_str("Function"),
        }
    }
}

/// How an object's contents can be drained into a sequence.
pub(crate) enum Iteration {
    Sequential(Rc<dyn Iterable>),
    Pull(Rc<RefCell<dyn PullIterator>>),
}

#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Data(Value),
    WriteOnce(WriteOnce),
}

#[derive(Debug, Clone)]
pub(crate) struct Property {
    slot: Slot,
    flags: PropertyFlags,
}

impl Property {
    fn new(value: Value) -> Self {
        Property::with_flags(value, PropertyFlags::all())
    }

    fn with_flags(value: Value, flags: PropertyFlags) -> Self {
        Property {
            slot: Slot::Data(value),
            flags,
        }
    }

    pub(crate) fn value(&self) -> Value {
        match &self.slot {
            Slot::Data(value) => value.clone(),
            Slot::WriteOnce(cell) => cell.get().clone(),
        }
    }

    pub(crate) fn flags(&self) -> PropertyFlags {
        self.flags
    }

    pub(crate) fn is_configurable(&self) -> bool {
        self.flags.contains(PropertyFlags::CONFIGURABLE)
    }

    pub(crate) fn is_enumerable(&self) -> bool {
        self.flags.contains(PropertyFlags::ENUMERABLE)
    }

    /// A write-once slot stays writable until its commit.
    pub(crate) fn is_writable(&self) -> bool {
        match &self.slot {
            Slot::Data(_) => self.flags.contains(PropertyFlags::WRITABLE),
            Slot::WriteOnce(cell) => !cell.is_committed(),
        }
    }

    fn assign(&mut self, value: Value) -> bool {
        let writable = self.flags.contains(PropertyFlags::WRITABLE);
        match &mut self.slot {
            Slot::Data(current) if writable => {
                *current = value;
                true
            }
            Slot::Data(_) => false,
            Slot::WriteOnce(cell) => {
                let accepted = cell.commit(value);
                if !accepted {
                    trace!("write-once property already assigned, write ignored");
                }
                accepted
            }
        }
    }

    /// Pins the current value; write-once slots become plain read-only data.
    pub(crate) fn make_read_only(&mut self) {
        if let Slot::WriteOnce(_) = self.slot {
            self.slot = Slot::Data(self.value());
        }
        self.flags.remove(PropertyFlags::WRITABLE);
    }

    pub(crate) fn make_non_configurable(&mut self) {
        self.flags.remove(PropertyFlags::CONFIGURABLE);
    }

    pub(crate) fn make_hidden(&mut self) {
        self.flags.remove(PropertyFlags::ENUMERABLE);
    }

    /// Turns the slot into a write-once cell seeded with the current value.
    pub(crate) fn make_write_once(&mut self) {
        let seed = self.value();
        self.slot = Slot::WriteOnce(WriteOnce::new(seed));
        self.flags.remove(PropertyFlags::WRITABLE | PropertyFlags::CONFIGURABLE);
    }

    pub(crate) fn write_once(seed: Value) -> Self {
        let mut property = Property::new(seed);
        property.make_write_once();
        property
    }

    fn map_value(self, mut f: impl FnMut(Value) -> Value) -> Property {
        let slot = match self.slot {
            Slot::Data(value) => Slot::Data(f(value)),
            Slot::WriteOnce(cell) => Slot::WriteOnce(cell.map(f)),
        };
        Property {
            slot,
            flags: self.flags,
        }
    }
}

/// Largest canonical array index, `2^32 - 2`. Larger numeric keys are named properties.
const MAX_INDEX: usize = u32::MAX as usize - 1;

/// Indexed slots of an array, stored sparsely. Indices below `len` without a slot are holes.
#[derive(Debug, Clone, Default)]
struct Elements {
    slots: BTreeMap<usize, Property>,
    len: usize,
}

impl Elements {
    fn dense(properties: impl IntoIterator<Item = Property>) -> Self {
        let slots: BTreeMap<usize, Property> = properties.into_iter().enumerate().collect();
        Elements {
            len: slots.len(),
            slots,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn get(&self, index: usize) -> Option<&Property> {
        self.slots.get(&index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut Property> {
        self.slots.get_mut(&index)
    }

    /// `index` never exceeds [`MAX_INDEX`], so the length cannot overflow.
    fn insert(&mut self, index: usize, property: Property) {
        self.slots.insert(index, property);
        self.len = self.len.max(index + 1);
    }

    fn remove(&mut self, index: usize) -> Option<Property> {
        self.slots.remove(&index)
    }

    fn iter(&self) -> impl Iterator<Item = (usize, &Property)> + '_ {
        self.slots.iter().map(|(index, p)| (*index, p))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Property> + '_ {
        self.slots.values_mut()
    }

    /// Same length and holes, each present slot rebuilt by `f`; `None` drops the slot.
    fn rebuild(self, mut f: impl FnMut(Property) -> Option<Property>) -> Self {
        Elements {
            slots: self
                .slots
                .into_iter()
                .filter_map(|(index, p)| f(p).map(|p| (index, p)))
                .collect(),
            len: self.len,
        }
    }
}

struct ObjectData {
    kind: ObjectKind,
    extensible: bool,
    /// Indexed slots, used by arrays only.
    elements: Elements,
    properties: IndexMap<String, Property>,
}

impl ObjectData {
    fn new(kind: ObjectKind) -> Self {
        ObjectData {
            kind,
            extensible: true,
            elements: Elements::default(),
            properties: IndexMap::new(),
        }
    }

    fn property(&self, key: &str) -> Option<&Property> {
        if self.kind.is_array() {
            if let Some(index) = array_index(key) {
                return self.elements.get(index);
            }
        }
        self.properties.get(key)
    }

    fn property_mut(&mut self, key: &str) -> Option<&mut Property> {
        if self.kind.is_array() {
            if let Some(index) = array_index(key) {
                return self.elements.get_mut(index);
            }
        }
        self.properties.get_mut(key)
    }

    /// Own properties in enumeration order: indices ascending, then named keys.
    fn iter(&self) -> impl Iterator<Item = (String, &Property)> + '_ {
        let elements = self
            .elements
            .iter()
            .map(|(index, p)| (index.to_string(), p));
        let named = self.properties.iter().map(|(key, p)| (key.clone(), p));
        elements.chain(named)
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut Property> + '_ {
        self.elements
            .iter_mut()
            .chain(self.properties.values_mut())
    }

    fn set_element(&mut self, index: usize, value: Value) -> bool {
        if let Some(property) = self.elements.get_mut(index) {
            return property.assign(value);
        }
        if !self.extensible || index > MAX_INDEX {
            return false;
        }
        self.elements.insert(index, Property::new(value));
        true
    }

    fn insert(&mut self, key: &str, property: Property) {
        if self.kind.is_array() {
            if let Some(index) = array_index(key) {
                self.elements.insert(index, property);
                return;
            }
        }
        self.properties.insert(key.to_owned(), property);
    }
}

/// Parses a canonical array index: `"0"`, `"17"`, never `"01"`, `"-1"` or
/// anything above [`MAX_INDEX`].
fn array_index(key: &str) -> Option<usize> {
    let canonical = !key.is_empty()
        && key.bytes().all(|b| b.is_ascii_digit())
        && (key.len() == 1 || !key.starts_with('0'));
    if !canonical {
        return None;
    }
    key.parse::<u32>()
        .ok()
        .map(|index| index as usize)
        .filter(|&index| index <= MAX_INDEX)
}

/// Object is a shared handle to a mutable composite or function.
///
/// Cloning the handle aliases the same object; use [`Object::deep_clone`] for
/// an independent copy. Property access never fails: writes to read-only or
/// non-extensible targets are ignored and reported through the boolean result.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Object {
    fn with_kind(kind: ObjectKind) -> Self {
        Object(Rc::new(RefCell::new(ObjectData::new(kind))))
    }

    /// Creates an empty native plain map.
    pub fn plain() -> Self {
        Object::with_kind(ObjectKind::Plain)
    }

    /// Creates an empty array.
    pub fn array() -> Self {
        Object::with_kind(ObjectKind::Array)
    }

    /// Creates an array holding `values` in order.
    pub fn from_values(values: impl IntoIterator<Item = Value>) -> Self {
        let array = Object::array();
        array.0.borrow_mut().elements = Elements::dense(values.into_iter().map(Property::new));
        array
    }

    /// Creates a keyed composite that is not a native plain map.
    pub fn branded(brand: impl Into<String>) -> Self {
        Object::with_kind(ObjectKind::Branded(brand.into()))
    }

    /// Creates a function object.
    pub fn function(f: impl Callable + 'static) -> Self {
        Object::with_kind(ObjectKind::Function(Rc::new(f)))
    }

    /// Creates a composite exposing a sequential iteration capability.
    pub fn iterable(source: impl Iterable + 'static) -> Self {
        Object::with_kind(ObjectKind::Iterable(Rc::new(source)))
    }

    /// Creates a composite exposing a pull-based `next` capability.
    pub fn iterator(source: impl PullIterator + 'static) -> Self {
        Object::with_kind(ObjectKind::Iterator(Rc::new(RefCell::new(source))))
    }

    /// Returns a copy of the kind tag.
    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    pub fn is_array(&self) -> bool {
        self.0.borrow().kind.is_array()
    }

    pub fn is_plain(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Plain)
    }

    pub fn is_function(&self) -> bool {
        matches!(self.0.borrow().kind, ObjectKind::Function(_))
    }

    /// Every kind except functions is a composite.
    pub fn is_composite(&self) -> bool {
        !self.is_function()
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Invokes a function object. Returns `None` for other kinds.
    pub fn call(&self, args: &[Value]) -> Option<Value> {
        let callable = match &self.0.borrow().kind {
            ObjectKind::Function(callable) => Rc::clone(callable),
            _ => return None,
        };
        Some(callable.call(args))
    }

    pub(crate) fn iteration(&self) -> Option<Iteration> {
        match &self.0.borrow().kind {
            ObjectKind::Iterable(source) => Some(Iteration::Sequential(Rc::clone(source))),
            ObjectKind::Iterator(source) => Some(Iteration::Pull(Rc::clone(source))),
            _ => None,
        }
    }

    /// Reads a property. Absent keys read as `Undefined`; arrays also answer `"length"`.
    pub fn get(&self, key: &str) -> Value {
        let data = self.0.borrow();
        if let Some(property) = data.property(key) {
            return property.value();
        }
        if data.kind.is_array() && key == "length" {
            return Value::Int(data.elements.len() as i64);
        }
        Value::Undefined
    }

    /// Reads an array element; holes and out-of-range indices read as `Undefined`.
    pub fn get_index(&self, index: usize) -> Value {
        self.0
            .borrow()
            .elements
            .get(index)
            .map(Property::value)
            .unwrap_or_default()
    }

    /// Assigns a property. Returns whether the write took effect.
    pub fn set(&self, key: &str, value: Value) -> bool {
        let mut guard = self.0.borrow_mut();
        let data = &mut *guard;
        if data.kind.is_array() {
            if let Some(index) = array_index(key) {
                return data.set_element(index, value);
            }
            if key == "length" {
                return false;
            }
        }
        if let Some(property) = data.properties.get_mut(key) {
            return property.assign(value);
        }
        if !data.extensible {
            trace!(key, "object is not extensible, property not added");
            return false;
        }
        data.properties.insert(key.to_owned(), Property::new(value));
        true
    }

    /// Appends to an array. Returns whether the element was added.
    pub fn push(&self, value: Value) -> bool {
        let mut data = self.0.borrow_mut();
        let index = data.elements.len();
        data.set_element(index, value)
    }

    /// Defines or redefines a data property with explicit flags.
    ///
    /// Fails on an existing non-configurable property, and on a new property
    /// of a non-extensible object.
    pub fn define(&self, key: &str, value: Value, flags: PropertyFlags) -> bool {
        let mut guard = self.0.borrow_mut();
        let data = &mut *guard;
        let allowed = match data.property(key) {
            Some(existing) => existing.is_configurable(),
            None => data.extensible,
        };
        if allowed {
            data.insert(key, Property::with_flags(value, flags));
        }
        allowed
    }

    /// Removes a configurable property, leaving a hole in arrays.
    pub fn delete(&self, key: &str) -> bool {
        let mut guard = self.0.borrow_mut();
        let data = &mut *guard;
        if data.kind.is_array() {
            if let Some(index) = array_index(key) {
                let removable = data
                    .elements
                    .get(index)
                    .is_some_and(Property::is_configurable);
                if removable {
                    data.elements.remove(index);
                }
                return removable;
            }
        }
        let removable = data
            .properties
            .get(key)
            .is_some_and(Property::is_configurable);
        if removable {
            data.properties.shift_remove(key);
        }
        removable
    }

    /// Returns true if `key` is an own property, enumerable or not.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().property(key).is_some()
    }

    /// Returns the flags of an own property.
    pub fn flags(&self, key: &str) -> Option<PropertyFlags> {
        self.0.borrow().property(key).map(Property::flags)
    }

    /// Returns true if the own property `key` currently accepts writes.
    pub fn is_writable(&self, key: &str) -> bool {
        self.0.borrow().property(key).is_some_and(Property::is_writable)
    }

    /// Number of index slots (holes included). Zero for anything but arrays.
    pub fn len(&self) -> usize {
        self.0.borrow().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        let data = self.0.borrow();
        data.elements.is_empty() && data.properties.is_empty()
    }

    /// Own enumerable keys.
    pub fn keys(&self) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter(|(_, p)| p.is_enumerable())
            .map(|(key, _)| key)
            .collect()
    }

    /// Own enumerable key/value pairs.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .filter(|(_, p)| p.is_enumerable())
            .map(|(key, p)| (key, p.value()))
            .collect()
    }

    /// Own enumerable values.
    pub fn values(&self) -> Vec<Value> {
        self.0
            .borrow()
            .iter()
            .filter(|(_, p)| p.is_enumerable())
            .map(|(_, p)| p.value())
            .collect()
    }

    /// Own keys, hidden ones included.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(key, _)| key).collect()
    }

    /// Own values, hidden ones included.
    pub fn own_values(&self) -> Vec<Value> {
        self.0.borrow().iter().map(|(_, p)| p.value()).collect()
    }

    /// Array elements in index order, holes read as `Undefined`.
    ///
    /// Allocates the full length; use [`Object::indices`] to walk a sparse array.
    pub fn elements(&self) -> Vec<Value> {
        (0..self.len()).map(|index| self.get_index(index)).collect()
    }

    /// Indices of the array slots that are present, hidden ones included, ascending.
    pub fn indices(&self) -> Vec<usize> {
        self.0.borrow().elements.iter().map(|(index, _)| index).collect()
    }

    pub fn is_extensible(&self) -> bool {
        self.0.borrow().extensible
    }

    pub(crate) fn prevent_extensions(&self) {
        self.0.borrow_mut().extensible = false;
    }

    pub(crate) fn update_properties(&self, mut f: impl FnMut(&mut Property)) {
        for property in self.0.borrow_mut().iter_mut() {
            f(property);
        }
    }

    /// Applies `f` to one own property. Returns false if there is none.
    pub(crate) fn update_property(&self, key: &str, f: impl FnOnce(&mut Property)) -> bool {
        match self.0.borrow_mut().property_mut(key) {
            Some(property) => {
                f(property);
                true
            }
            None => false,
        }
    }

    pub(crate) fn all_properties(&self, f: impl Fn(&Property) -> bool) -> bool {
        self.0.borrow().iter().all(|(_, p)| f(p))
    }

    /// Adds a property if the object is extensible.
    pub(crate) fn install(&self, key: &str, property: Property) -> bool {
        let mut data = self.0.borrow_mut();
        if !data.extensible {
            return false;
        }
        data.insert(key, property);
        true
    }

    /// Copies the own enumerable properties into a new, fully permissive object of the same kind.
    pub fn shallow_copy(&self) -> Object {
        let data = self.0.borrow();
        let mut copy = ObjectData::new(data.kind.clone());
        copy.elements = data.elements.clone().rebuild(|p| {
            p.is_enumerable().then(|| Property::new(p.value()))
        });
        copy.properties = data
            .properties
            .iter()
            .filter(|(_, p)| p.is_enumerable())
            .map(|(key, p)| (key.clone(), Property::new(p.value())))
            .collect();
        Object(Rc::new(RefCell::new(copy)))
    }

    /// Copies the whole reachable graph, preserving aliasing, cycles and property flags.
    ///
    /// Function, iterable and iterator capabilities are shared with the original.
    pub fn deep_clone(&self) -> Object {
        self.deep_clone_with(&mut HashMap::new())
    }

    fn deep_clone_with(&self, seen: &mut HashMap<usize, Object>) -> Object {
        if let Some(copy) = seen.get(&self.addr()) {
            return copy.clone();
        }
        let (mut copy, elements, properties) = {
            let data = self.0.borrow();
            let mut copy = ObjectData::new(data.kind.clone());
            copy.extensible = data.extensible;
            (copy, data.elements.clone(), data.properties.clone())
        };
        let handle = Object::with_kind(copy.kind.clone());
        seen.insert(self.addr(), handle.clone());

        copy.elements = elements.rebuild(|p| Some(p.map_value(|v| deep_clone_value(v, seen))));
        copy.properties = properties
            .into_iter()
            .map(|(key, p)| (key, p.map_value(|v| deep_clone_value(v, seen))))
            .collect();
        *handle.0.borrow_mut() = copy;
        handle
    }

    pub(crate) fn render(&self, f: &mut fmt::Formatter<'_>, ancestors: &mut Vec<usize>) -> fmt::Result {
        if ancestors.contains(&self.addr()) {
            return f.write_str("[Circular]");
        }
        let (kind, entries) = (self.kind(), self.entries());

        ancestors.push(self.addr());
        let result = match kind {
            ObjectKind::Array => {
                f.write_str("[")?;
                let mut next = 0;
                for index in self.indices() {
                    if index > next {
                        render_holes(f, next, index - next)?;
                    }
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    self.get_index(index).render(f, ancestors)?;
                    next = index + 1;
                }
                if self.len() > next {
                    render_holes(f, next, self.len() - next)?;
                }
                f.write_str("]")
            }
            other => {
                match other {
                    ObjectKind::Branded(brand) => write!(f, "{} ", brand)?,
                    ObjectKind::Function(_) => f.write_str("[Function] ")?,
                    ObjectKind::Iterable(_) => f.write_str("[Iterable] ")?,
                    ObjectKind::Iterator(_) => f.write_str("[Iterator] ")?,
                    _ => {}
                }
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: ", key)?;
                    value.render(f, ancestors)?;
                }
                if entries.is_empty() {
                    f.write_str("}")
                } else {
                    f.write_str(" }")
                }
            }
        };
        ancestors.pop();
        result
    }
}

fn render_holes(f: &mut fmt::Formatter<'_>, start: usize, count: usize) -> fmt::Result {
    if start > 0 {
        f.write_str(", ")?;
    }
    match count {
        1 => f.write_str("<1 empty item>"),
        n => write!(f, "<{} empty items>", n),
    }
}

fn deep_clone_value(value: Value, seen: &mut HashMap<usize, Object>) -> Value {
    match value {
        Value::Object(object) => Value::Object(object.deep_clone_with(seen)),
        scalar => scalar,
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, &mut Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_index_parsing() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("length"), None);
        assert_eq!(array_index("4294967294"), Some(4_294_967_294));
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("18446744073709551615"), None);
    }

    #[test]
    fn test_sparse_array_writes() {
        let array = Object::array();
        assert!(array.set("4294967294", Value::Int(1)));
        assert_eq!(array.len(), 4_294_967_295);
        assert_eq!(array.indices(), vec![4_294_967_294]);
        assert!(!array.push(Value::Int(2)));
        assert!(array.set("4294967295", Value::Int(3)));
        assert_eq!(array.len(), 4_294_967_295);
        assert_eq!(array.own_keys(), vec!["4294967294", "4294967295"]);
    }

    #[test]
    fn test_debug_renders_holes() {
        let array = Object::from_values(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        array.delete("1");
        assert_eq!(format!("{:?}", array), "[1, <1 empty item>, 3]");
        array.set("6", Value::Int(7));
        array.delete("0");
        assert_eq!(
            format!("{:?}", array),
            "[<2 empty items>, 3, <3 empty items>, 7]"
        );
    }

    #[test]
    fn test_plain_map_preserves_insertion_order() {
        let map = Object::plain();
        map.set("b", Value::Int(1));
        map.set("a", Value::Int(2));
        map.set("c", Value::Int(3));
        assert_eq!(map.keys(), vec!["b", "a", "c"]);
        map.delete("a");
        assert_eq!(map.keys(), vec!["b", "c"]);
    }

    #[test]
    fn test_array_element_access() {
        let array = Object::from_values(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(array.get("1"), Value::Int(2));
        assert_eq!(array.get("length"), Value::Int(2));
        assert_eq!(array.keys(), vec!["0", "1"]);

        assert!(array.set("3", Value::Int(4)));
        assert_eq!(array.len(), 4);
        assert_eq!(array.get_index(2), Value::Undefined);
        assert_eq!(array.keys(), vec!["0", "1", "3"]);
    }

    #[test]
    fn test_array_delete_leaves_hole() {
        let array = Object::from_values(vec![Value::Int(1), Value::Int(2)]);
        assert!(array.delete("0"));
        assert_eq!(array.len(), 2);
        assert!(!array.has_own("0"));
        assert_eq!(array.elements(), vec![Value::Undefined, Value::Int(2)]);
    }

    #[test]
    fn test_non_writable_and_non_extensible_writes_are_ignored() {
        let map = Object::plain();
        assert!(map.define("fixed", Value::Int(1), PropertyFlags::ENUMERABLE));
        assert!(!map.set("fixed", Value::Int(2)));
        assert_eq!(map.get("fixed"), Value::Int(1));
        assert!(!map.delete("fixed"));
        assert!(!map.define("fixed", Value::Int(3), PropertyFlags::all()));

        map.prevent_extensions();
        assert!(!map.set("new", Value::Int(1)));
        assert!(!map.has_own("new"));
    }

    #[test]
    fn test_hidden_properties_are_not_enumerated() {
        let map = Object::plain();
        map.set("visible", Value::Int(1));
        map.define("hidden", Value::Int(2), PropertyFlags::WRITABLE | PropertyFlags::CONFIGURABLE);
        assert_eq!(map.keys(), vec!["visible"]);
        assert_eq!(map.own_keys(), vec!["visible", "hidden"]);
        assert_eq!(map.get("hidden"), Value::Int(2));
    }

    #[test]
    fn test_write_once_property() {
        let map = Object::plain();
        assert!(map.install("k", Property::write_once(Value::Undefined)));
        assert!(map.is_writable("k"));
        assert!(map.set("k", Value::Int(1)));
        assert!(!map.set("k", Value::Int(2)));
        assert_eq!(map.get("k"), Value::Int(1));
        assert!(!map.is_writable("k"));
    }

    #[test]
    fn test_deep_clone_preserves_cycles_and_aliases() {
        let shared = Object::plain();
        let root = Object::plain();
        root.set("a", Value::Object(shared.clone()));
        root.set("b", Value::Object(shared.clone()));
        root.set("self", Value::Object(root.clone()));

        let copy = root.deep_clone();
        assert!(!copy.ptr_eq(&root));
        let (a, b) = (copy.get("a"), copy.get("b"));
        match (&a, &b, copy.get("self")) {
            (Value::Object(a), Value::Object(b), Value::Object(me)) => {
                assert!(a.ptr_eq(b));
                assert!(!a.ptr_eq(&shared));
                assert!(me.ptr_eq(&copy));
            }
            other => panic!("unexpected clone shape: {:?}", other),
        }
    }

    #[test]
    fn test_debug_marks_cycles() {
        let root = Object::plain();
        root.set("n", Value::Int(1));
        root.set("me", Value::Object(root.clone()));
        assert_eq!(format!("{:?}", root), "{ n: 1, me: [Circular] }");
    }

    #[test]
    fn test_function_call() {
        let f = Object::function(|args: &[Value]| Value::Int(args.len() as i64));
        assert!(f.is_function());
        assert!(!f.is_composite());
        assert_eq!(f.call(&[Value::Null, Value::Null]), Some(Value::Int(2)));
        assert_eq!(Object::plain().call(&[]), None);
    }
}
