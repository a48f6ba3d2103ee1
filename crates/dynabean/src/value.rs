//! Property values
//!
//! [`Value`] is what a property store holds and what dispatch passes around.
//! Scalars and strings are held inline. Sequences and sets are shared handles:
//! a getter returns the same container the store holds, so mutating it through
//! the handle mutates the property. Deep copies are made only by `clone`.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHasher;

use crate::host::HostValue;
use crate::instance::DynaBean;
use crate::types::PrimitiveType;

/// A property value
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent value; storing it removes the property
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Unicode scalar
    Char(char),
    /// 8-bit signed integer
    Byte(i8),
    /// 16-bit signed integer
    Short(i16),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit float
    Float(f32),
    /// 64-bit float
    Double(f64),
    /// Immutable text
    String(String),
    /// Shared ordered sequence
    Sequence(Sequence),
    /// Shared insertion-ordered set
    Set(ValueSet),
    /// Another dynabean instance
    Bean(DynaBean),
    /// Opaque host value
    Host(HostValue),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Primitive type of this value, if it is a scalar
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Char(_) => Some(PrimitiveType::Char),
            Value::Byte(_) => Some(PrimitiveType::Byte),
            Value::Short(_) => Some(PrimitiveType::Short),
            Value::Int(_) => Some(PrimitiveType::Int),
            Value::Long(_) => Some(PrimitiveType::Long),
            Value::Float(_) => Some(PrimitiveType::Float),
            Value::Double(_) => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    /// Get type name for diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Bean(bean) => bean.contract_name(),
            Value::Host(host) => host.type_name(),
            other => other
                .primitive_type()
                .map(|p| p.type_name())
                .unwrap_or("unknown"),
        }
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract i32 value
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract i64 value
    pub fn as_long(&self) -> Option<i64> {
        match self {
            Value::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract f64 value
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Borrow string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the sequence handle
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    /// Get the set handle
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    /// Get the dynabean handle
    pub fn as_bean(&self) -> Option<&DynaBean> {
        match self {
            Value::Bean(bean) => Some(bean),
            _ => None,
        }
    }

    /// Get the host value
    pub fn as_host(&self) -> Option<&HostValue> {
        match self {
            Value::Host(host) => Some(host),
            _ => None,
        }
    }
}

// Floats compare by bit pattern so that equality stays reflexive and agrees
// with hashing.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Short(a), Value::Short(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Bean(a), Value::Bean(b)) => a == b,
            (Value::Host(a), Value::Host(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::Byte(i) => i.hash(state),
            Value::Short(i) => i.hash(state),
            Value::Int(i) => i.hash(state),
            Value::Long(i) => i.hash(state),
            Value::Float(f) => f.to_bits().hash(state),
            Value::Double(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::Sequence(seq) => seq.hash(state),
            Value::Set(set) => set.hash(state),
            Value::Bean(bean) => state.write_u64(bean.hash_code()),
            Value::Host(host) => host.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::Byte(i) => write!(f, "{}", i),
            Value::Short(i) => write!(f, "{}", i),
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Double(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(seq) => write_elements(f, &seq.borrow()),
            Value::Set(set) => write_elements(f, &set.borrow()),
            Value::Bean(bean) => write!(f, "{}", bean),
            Value::Host(host) => write!(f, "{:?}", host),
        }
    }
}

fn write_elements(f: &mut fmt::Formatter<'_>, elements: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", element)?;
    }
    write!(f, "]")
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    char => Char,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Sequence => Sequence,
    ValueSet => Set,
    DynaBean => Bean,
    HostValue => Host,
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Sequence(Sequence::from_vec(values))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

// ============================================================================
// Sequence
// ============================================================================

/// Shared, ordered sequence of values
///
/// Cloning the handle shares the underlying storage. Equality is
/// element-wise.
#[derive(Clone, Default)]
pub struct Sequence(Rc<RefCell<Vec<Value>>>);

impl Sequence {
    /// Create a new empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence owning `values`
    pub fn from_vec(values: Vec<Value>) -> Self {
        Sequence(Rc::new(RefCell::new(values)))
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get an element by index
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned()
    }

    /// Replace an element by index
    pub fn set(&self, index: usize, value: Value) -> Result<(), String> {
        let mut elements = self.0.borrow_mut();
        let len = elements.len();
        match elements.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(format!(
                "Sequence index {} out of bounds (length {})",
                index, len
            )),
        }
    }

    /// Append an element
    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(value);
    }

    /// Remove and return the element at `index`
    pub fn remove(&self, index: usize) -> Option<Value> {
        let mut elements = self.0.borrow_mut();
        if index < elements.len() {
            Some(elements.remove(index))
        } else {
            None
        }
    }

    /// Remove all elements
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Snapshot of the elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Borrow the elements
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Check whether both handles share the same storage
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl Eq for Sequence {}

impl Hash for Sequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.borrow().hash(state);
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(elements) => f.debug_list().entries(elements.iter()).finish(),
            Err(_) => write!(f, "Sequence(<borrowed>)"),
        }
    }
}

impl FromIterator<Value> for Sequence {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Sequence::from_vec(iter.into_iter().collect())
    }
}

// ============================================================================
// ValueSet
// ============================================================================

/// Shared set of unique values, iterated in insertion order
///
/// Equality ignores order, like any set. Membership is a linear scan, which
/// keeps mutable containers usable as elements.
#[derive(Clone, Default)]
pub struct ValueSet(Rc<RefCell<Vec<Value>>>);

impl ValueSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Add a value; returns false if an equal value was already present
    pub fn insert(&self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.0.borrow_mut().push(value);
        true
    }

    /// Check if value exists
    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().iter().any(|v| v == value)
    }

    /// Delete a value, returns true if value existed
    pub fn remove(&self, value: &Value) -> bool {
        let mut elements = self.0.borrow_mut();
        match elements.iter().position(|v| v == value) {
            Some(index) => {
                elements.remove(index);
                true
            }
            None => false,
        }
    }

    /// Clear all elements
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Get all values in insertion order
    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }

    /// Borrow the elements in insertion order
    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    /// Check whether both handles share the same storage
    pub fn ptr_eq(&self, other: &ValueSet) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let mine = self.0.borrow();
        mine.len() == other.len() && mine.iter().all(|v| other.contains(v))
    }
}

impl Eq for ValueSet {}

impl Hash for ValueSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent: sum of element hashes
        let mut sum = 0u64;
        for element in self.0.borrow().iter() {
            let mut hasher = FxHasher::default();
            element.hash(&mut hasher);
            sum = sum.wrapping_add(hasher.finish());
        }
        state.write_u64(sum);
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(elements) => f.debug_set().entries(elements.iter()).finish(),
            Err(_) => write!(f, "ValueSet(<borrowed>)"),
        }
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let set = ValueSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}
