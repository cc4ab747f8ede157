//! Combined `Effect` + `ParameterInfo` trait for boxed effects.
//!
//! `Box<dyn Effect>` loses access to [`ParameterInfo`]. [`EffectWithParams`]
//! carries both through a single vtable with prefixed method names, and a
//! blanket impl covers every type implementing both traits.

use crate::effect::Effect;
use crate::param_info::{ParamDescriptor, ParameterInfo};

/// Object-safe access to an effect's parameters through a trait object.
pub trait EffectWithParams: Effect {
    /// Get the parameter count.
    fn effect_param_count(&self) -> usize;

    /// Get parameter info by index.
    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Get parameter value by index.
    fn effect_get_param(&self, index: usize) -> f32;

    /// Set parameter value by index.
    fn effect_set_param(&mut self, index: usize, value: f32);

    /// Apply a full positional parameter list, in descriptor order.
    ///
    /// Extra values past `effect_param_count()` are ignored.
    fn effect_apply_params(&mut self, values: &[f32]) {
        for (index, &value) in values.iter().enumerate().take(self.effect_param_count()) {
            self.effect_set_param(index, value);
        }
    }
}

impl<T: Effect + ParameterInfo> EffectWithParams for T {
    fn effect_param_count(&self) -> usize {
        self.param_count()
    }

    fn effect_param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.param_info(index)
    }

    fn effect_get_param(&self, index: usize) -> f32 {
        self.get_param(index)
    }

    fn effect_set_param(&mut self, index: usize, value: f32) {
        self.set_param(index, value)
    }
}
