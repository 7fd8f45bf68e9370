//! SolOut that records every step endpoint together with its derivative.

use crate::{
    Float,
    core::{
        interpolate::Interpolate,
        solout::{ControlFlag, SolOut},
    },
};

#[derive(Debug, Default)]
pub(crate) struct SampleRecorder {
    t: Vec<Float>,
    y: Vec<Vec<Float>>,
    dy: Vec<Vec<Float>>,
}

impl SampleRecorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn into_data(self) -> (Vec<Float>, Vec<Vec<Float>>, Vec<Vec<Float>>) {
        (self.t, self.y, self.dy)
    }
}

impl SolOut for SampleRecorder {
    fn solout<I: Interpolate>(
        &mut self,
        _xold: Float,
        x: Float,
        y: &[Float],
        dydx: &[Float],
        _interpolator: &I,
    ) -> ControlFlag {
        self.t.push(x);
        self.y.push(y.to_vec());
        self.dy.push(dydx.to_vec());
        ControlFlag::Continue
    }
}
