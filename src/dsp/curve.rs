/*
Parameter Curves
================

A ParamCurve is a time-ordered list of automation events for one parameter
(gain, oscillator frequency, filter cutoff). Every event carries an ABSOLUTE
time on the device clock, in seconds. Rendering a curve never depends on when
the host thread happened to schedule it, which is what keeps the voices of a
multi-oscillator cue locked together.

Vocabulary
----------

  Set          Jump to `value` at `time` and hold it.

  Linear       Ramp linearly from the previous event's (time, value) so that
               the parameter reaches `value` exactly at `time`.

  Exponential  Same as Linear, but the ramp is geometric:

                   v(t) = v0 * (v1 / v0) ^ ((t - t0) / (t1 - t0))

               Geometric ramps sound "natural" for both pitch (equal musical
               steps per unit time) and loudness (equal dB per unit time).


Why Exponential Ramps Never Reach Zero
--------------------------------------

The geometric formula divides by v0 and takes a ratio to a power. With v0 = 0
or v1 = 0 it is undefined (0/0, or log(0) = -inf). So exponential ramps clamp
both endpoints to EPSILON (1e-4, i.e. -80 dB). A decay "to silence" is an
exponential ramp to EPSILON; it is inaudible and always finite, and volume 0
simply produces a ramp from EPSILON to EPSILON.

Curves in this crate only automate positive quantities (gain, Hz).


Evaluation
----------

    before the first event   -> first event's value
    between events           -> shaped by the NEXT event's kind
    after the last event     -> last event's value

  Value
    peak ┐   ╱╲
         │  ╱  ╲
         │ ╱    ╲__
    eps  └╱        ╲_______──→ Time
          attack  exponential decay
          (linear)
*/

/// Smallest magnitude an exponential ramp may start from or target.
pub const EPSILON: f32 = 1e-4;

/// One automation event. Times are absolute seconds on the device clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveEvent {
    Set { time: f64, value: f32 },
    Linear { time: f64, value: f32 },
    Exponential { time: f64, value: f32 },
}

impl CurveEvent {
    pub fn time(&self) -> f64 {
        match *self {
            CurveEvent::Set { time, .. }
            | CurveEvent::Linear { time, .. }
            | CurveEvent::Exponential { time, .. } => time,
        }
    }

    pub fn value(&self) -> f32 {
        match *self {
            CurveEvent::Set { value, .. }
            | CurveEvent::Linear { value, .. }
            | CurveEvent::Exponential { value, .. } => value,
        }
    }
}

/// Time-varying parameter built from automation events.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamCurve {
    events: Vec<CurveEvent>,
}

impl ParamCurve {
    /// A curve that holds `value` forever.
    pub fn constant(value: f32) -> Self {
        Self::starting_at(value, 0.0)
    }

    /// A curve that holds `value` from `time` on (and before it).
    pub fn starting_at(value: f32, time: f64) -> Self {
        Self {
            events: vec![CurveEvent::Set { time, value }],
        }
    }

    /// Attack-then-decay envelope: a short linear rise to `peak`, then an
    /// exponential decay reaching EPSILON at `end`.
    ///
    /// With `attack <= 0` the curve starts at `peak` immediately.
    pub fn decay(peak: f32, start: f64, attack: f64, end: f64) -> Self {
        if attack <= 0.0 {
            return Self::starting_at(peak, start).exponential_to(EPSILON, end);
        }
        Self::starting_at(0.0, start)
            .linear_to(peak, start + attack)
            .exponential_to(EPSILON, end)
    }

    /// Sustained envelope: linear rise to `peak`, hold, then an exponential
    /// release that reaches EPSILON at `end`.
    pub fn swell(peak: f32, start: f64, attack: f64, release: f64, end: f64) -> Self {
        let release_start = (end - release).max(start + attack);
        Self::starting_at(0.0, start)
            .linear_to(peak, start + attack)
            .linear_to(peak, release_start)
            .exponential_to(EPSILON, end)
    }

    /// Linear ramp reaching `value` at `time`.
    pub fn linear_to(self, value: f32, time: f64) -> Self {
        self.push(|time| CurveEvent::Linear { time, value }, time)
    }

    /// Exponential ramp reaching `value` at `time`.
    pub fn exponential_to(self, value: f32, time: f64) -> Self {
        self.push(|time| CurveEvent::Exponential { time, value }, time)
    }

    fn push(mut self, event: impl FnOnce(f64) -> CurveEvent, time: f64) -> Self {
        // Events stay sorted; an out-of-order time is pinned to the last one.
        let last = self.end_time();
        self.events.push(event(time.max(last)));
        self
    }

    pub fn events(&self) -> &[CurveEvent] {
        &self.events
    }

    /// Time of the last automation event.
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, CurveEvent::time)
    }

    /// True when the curve never changes value.
    pub fn is_constant(&self) -> bool {
        let first = self.events[0].value();
        self.events.iter().all(|e| e.value() == first)
    }

    /// Evaluate the curve at absolute time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        // Number of events at or before t
        let idx = self.events.partition_point(|e| e.time() <= t);
        if idx == 0 {
            return self.events[0].value();
        }

        let prev = self.events[idx - 1];
        let Some(next) = self.events.get(idx) else {
            return prev.value();
        };

        // next.time() > t >= prev.time(), so the span is never zero
        let span = next.time() - prev.time();
        let progress = ((t - prev.time()) / span) as f32;

        match *next {
            CurveEvent::Set { .. } => prev.value(),
            CurveEvent::Linear { value, .. } => {
                prev.value() + (value - prev.value()) * progress
            }
            CurveEvent::Exponential { value, .. } => {
                let from = prev.value().max(EPSILON);
                let to = value.max(EPSILON);
                from * (to / from).powf(progress)
            }
        }
    }

    /// Fill `out` with curve values for consecutive samples starting at
    /// `start` and spaced `step` seconds apart.
    pub fn fill(&self, out: &mut [f32], start: f64, step: f64) {
        if self.events.len() == 1 {
            out.fill(self.events[0].value());
            return;
        }
        for (i, sample) in out.iter_mut().enumerate() {
            *sample = self.value_at(start + i as f64 * step);
        }
    }
}
