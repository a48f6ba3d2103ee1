//! Deep copy of property values
//!
//! Containers are rebuilt element by element, dynabeans are cloned, host
//! values are copied through their copy capability when they have one. All
//! other values are immutable and shared.
//!
//! Reference cycles between instances are not detected. Without a depth bound
//! a cycle recurses until the stack is exhausted; with
//! [`BeanOptions::max_copy_depth`](crate::BeanOptions::max_copy_depth) set it
//! fails with [`BeanError::CopyDepthExceeded`] instead.

use crate::error::{BeanError, BeanResult};
use crate::host::HostValue;
use crate::value::{Sequence, Value, ValueSet};

/// Deep copy a value, optionally bounded to `max_depth` nesting levels
pub fn deep_copy(value: &Value, max_depth: Option<usize>) -> BeanResult<Value> {
    copy_value(value, 0, max_depth)
}

pub(crate) fn copy_value(value: &Value, depth: usize, limit: Option<usize>) -> BeanResult<Value> {
    if let Some(limit) = limit {
        if depth > limit {
            return Err(BeanError::CopyDepthExceeded { limit });
        }
    }

    match value {
        Value::Sequence(sequence) => {
            let elements = sequence.to_vec();
            let copied = elements
                .iter()
                .map(|element| copy_value(element, depth + 1, limit))
                .collect::<BeanResult<Vec<_>>>()?;
            Ok(Value::Sequence(Sequence::from_vec(copied)))
        }
        Value::Set(set) => {
            let copied = ValueSet::new();
            for element in set.values() {
                copied.insert(copy_value(&element, depth + 1, limit)?);
            }
            Ok(Value::Set(copied))
        }
        Value::Bean(bean) => Ok(Value::Bean(bean.clone_at_depth(depth, limit)?)),
        Value::Host(host) => match host.object().copy_value() {
            None => Ok(value.clone()),
            Some(Ok(object)) => Ok(Value::Host(HostValue::from_rc(object))),
            Some(Err(source)) => Err(BeanError::CopyFailure {
                type_name: host.type_name().to_string(),
                source,
            }),
        },
        other => Ok(other.clone()),
    }
}
