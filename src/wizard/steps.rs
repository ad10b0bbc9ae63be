use crate::api::Channel;
use crate::config::GatingMode;
use std::fmt;
use std::str::FromStr;

/// One of the two top-level flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    /// Pre-signing prevention.
    Pre,
    /// Post-incident processing.
    Post,
}

impl Track {
    pub fn steps(self) -> &'static [Step] {
        match self {
            Self::Pre => PRE_STEPS,
            Self::Post => POST_STEPS,
        }
    }

    /// Chat-thread channel that reports of this track are filed under.
    pub fn channel(self) -> Channel {
        match self {
            Self::Pre => Channel::Prevention,
            Self::Post => Channel::PostCase,
        }
    }

    /// Entry route used by the home page.
    pub fn entry_path(self) -> &'static str {
        self.steps()[0].path
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pre => "pre",
            Self::Post => "post",
        })
    }
}

impl FromStr for Track {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(Self::Pre),
            "post" => Ok(Self::Post),
            other => Err(format!("unknown track: {other} (expected pre or post)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub path: &'static str,
    pub label: &'static str,
}

const PRE_STEPS: &[Step] = &[
    Step { path: "/pre/upload", label: "계약서 업로드" },
    Step { path: "/pre/risk", label: "위험 조항 분류" },
    Step { path: "/pre/mapping", label: "법령·판례 조합 매핑" },
];

const POST_STEPS: &[Step] = &[
    Step { path: "/post/collect", label: "증거 수집" },
    Step { path: "/post/classify", label: "증거 분류" },
    Step { path: "/post/simulate", label: "시뮬레이션" },
];

/// Index of the first step whose path prefixes `path`; 0 if none does.
pub fn current_step(track: Track, path: &str) -> usize {
    track
        .steps()
        .iter()
        .position(|s| path.starts_with(s.path))
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    Selected,
    Used,
    Upcoming,
}

pub fn step_state(idx: usize, current: usize) -> StepState {
    if idx == current {
        StepState::Selected
    } else if idx < current {
        StepState::Used
    } else {
        StepState::Upcoming
    }
}

/// Whether step `idx` may be navigated to from the step bar.
pub fn is_clickable(mode: GatingMode, idx: usize, current: usize) -> bool {
    match mode {
        GatingMode::Strict => idx == 0,
        GatingMode::Next => idx <= current + 1,
    }
}

/// Render-ready view of one step box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepView {
    pub index: usize,
    pub label: &'static str,
    pub path: &'static str,
    pub state: StepState,
    pub clickable: bool,
}

/// The step-indicator bar for `track` while the router is at `path`.
pub fn step_bar(track: Track, path: &str, mode: GatingMode) -> Vec<StepView> {
    let current = current_step(track, path);
    track
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| StepView {
            index,
            label: step.label,
            path: step.path,
            state: step_state(index, current),
            clickable: is_clickable(mode, index, current),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn current_step_is_prefix_match_with_default() {
        assert_eq!(current_step(Track::Pre, "/pre/upload"), 0);
        assert_eq!(current_step(Track::Pre, "/pre/risk?doc=3"), 1);
        assert_eq!(current_step(Track::Pre, "/pre/mapping/42"), 2);
        assert_eq!(current_step(Track::Post, "/post/simulate"), 2);
        assert_eq!(current_step(Track::Post, "/somewhere"), 0);
        assert_eq!(current_step(Track::Post, "/pre/risk"), 0);
    }

    #[test]
    fn states_follow_current_index() {
        let states: Vec<StepState> = step_bar(Track::Post, "/post/classify", GatingMode::Next)
            .into_iter()
            .map(|v| v.state)
            .collect();
        assert_eq!(
            states,
            vec![StepState::Used, StepState::Selected, StepState::Upcoming]
        );
    }

    #[test]
    fn gating_modes() {
        let strict: Vec<bool> = step_bar(Track::Pre, "/pre/mapping", GatingMode::Strict)
            .iter()
            .map(|v| v.clickable)
            .collect();
        assert_eq!(strict, vec![true, false, false]);

        let next: Vec<bool> = step_bar(Track::Pre, "/pre/upload", GatingMode::Next)
            .iter()
            .map(|v| v.clickable)
            .collect();
        assert_eq!(next, vec![true, true, false]);

        assert!(is_clickable(GatingMode::Next, 2, 1));
    }

    #[test]
    fn track_metadata() {
        assert_eq!(Track::Pre.entry_path(), "/pre/upload");
        assert_eq!(Track::Post.entry_path(), "/post/collect");
        assert_eq!(Track::Post.channel(), Channel::PostCase);
        assert_eq!("pre".parse::<Track>(), Ok(Track::Pre));
        assert!("both".parse::<Track>().is_err());
        assert_eq!(Track::Post.to_string(), "post");
    }
}
