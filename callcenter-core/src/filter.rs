//! Client-side filtering of call history.
//!
//! The visible set is the conjunction of three independent criteria:
//! a free-text search, a status selection and an agent selection.

use crate::agent::Agent;
use crate::call::{CallRecord, CallStatus};
use crate::identity::AgentId;

/// Display name used when a call's agent is not in the loaded collection.
pub const UNKNOWN_AGENT: &str = "Unknown Agent";

/// Either "all" or one specific value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// Resolve an agent's display name against the loaded agents.
pub fn resolve_agent_name(agents: &[Agent], agent_id: AgentId) -> &str {
    agents
        .iter()
        .find(|agent| agent.id == Some(agent_id))
        .map(|agent| agent.name.as_str())
        .unwrap_or(UNKNOWN_AGENT)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallFilter {
    pub search: String,
    pub status: Selection<CallStatus>,
    pub agent: Selection<AgentId>,
}

impl CallFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all three criteria in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.status.is_all() || !self.agent.is_all()
    }

    /// Numbers match case-sensitively; the resolved agent name matches case-insensitively.
    pub fn matches_search(&self, call: &CallRecord, agents: &[Agent]) -> bool {
        if call.from_number.contains(&self.search) || call.to_number.contains(&self.search) {
            return true;
        }
        resolve_agent_name(agents, call.agent_id)
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn matches(&self, call: &CallRecord, agents: &[Agent]) -> bool {
        self.matches_search(call, agents)
            && self.status.admits(&call.status)
            && self.agent.admits(&call.agent_id)
    }

    pub fn apply<'a>(&self, calls: &'a [CallRecord], agents: &[Agent]) -> Vec<&'a CallRecord> {
        calls
            .iter()
            .filter(|call| self.matches(call, agents))
            .collect()
    }
}

/// Status filter options: "all" followed by the distinct statuses present, first-seen order.
pub fn status_options(calls: &[CallRecord]) -> Vec<Selection<CallStatus>> {
    let mut options = vec![Selection::All];
    for call in calls {
        let option = Selection::Only(call.status.clone());
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// Agent filter options: "all" followed by every saved agent.
pub fn agent_options(agents: &[Agent]) -> Vec<Selection<AgentId>> {
    std::iter::once(Selection::All)
        .chain(agents.iter().filter_map(|agent| agent.id.map(Selection::Only)))
        .collect()
}

/// Pick the option after `current`, wrapping around. Unknown values restart at the first option.
pub fn cycle<T: Clone + PartialEq>(options: &[Selection<T>], current: &Selection<T>) -> Selection<T> {
    if options.is_empty() {
        return Selection::All;
    }
    let next = options
        .iter()
        .position(|option| option == current)
        .map(|index| (index + 1) % options.len())
        .unwrap_or(0);
    options[next].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn agent(id: Uuid, name: &str) -> Agent {
        Agent {
            id: Some(id),
            name: name.to_string(),
            prompt: "prompt".to_string(),
            voice_settings: None,
            personality_settings: None,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn call(agent_id: Uuid, from: &str, to: &str, status: &str) -> CallRecord {
        CallRecord {
            id: Some(Uuid::new_v4()),
            agent_id,
            provider_call_id: None,
            from_number: from.to_string(),
            to_number: to.to_string(),
            status: CallStatus::from(status),
            duration_seconds: None,
            transcript: None,
            metadata: None,
            error_message: None,
            started_at: None,
            ended_at: None,
            created_at: None,
        }
    }

    #[test]
    fn unresolved_agent_falls_back_to_unknown() {
        let agents = vec![agent(Uuid::new_v4(), "Sales Bot")];
        assert_eq!(resolve_agent_name(&agents, Uuid::new_v4()), UNKNOWN_AGENT);
    }

    #[test]
    fn status_options_are_distinct_statuses_plus_all() {
        let a = Uuid::new_v4();
        let calls: Vec<CallRecord> = ["completed", "failed", "answered", "completed", "initiated", "weird"]
            .iter()
            .map(|status| call(a, "1", "2", status))
            .collect();
        let options = status_options(&calls);
        let expected: Vec<Selection<CallStatus>> = std::iter::once(Selection::All)
            .chain(
                ["completed", "failed", "answered", "initiated", "weird"]
                    .iter()
                    .map(|s| Selection::Only(CallStatus::from(*s))),
            )
            .collect();
        assert_eq!(options, expected);
    }

    #[test]
    fn search_matches_numbers_case_sensitively_and_names_case_insensitively() {
        let sales = Uuid::new_v4();
        let support = Uuid::new_v4();
        let agents = vec![agent(sales, "Sales 415 Team"), agent(support, "Support")];
        let calls = vec![
            call(support, "+14155550100", "+12125550199", "completed"),
            call(support, "+12125550100", "+14155550199", "failed"),
            call(sales, "+13105550100", "+13105550199", "answered"),
            call(support, "+13105550100", "+13105550199", "answered"),
        ];
        let filter = CallFilter {
            search: "415".to_string(),
            ..CallFilter::default()
        };
        let visible = filter.apply(&calls, &agents);
        assert_eq!(visible.len(), 3);
        assert!(!visible.iter().any(|c| std::ptr::eq(*c, &calls[3])));

        let by_name = CallFilter {
            search: "SUPPORT".to_string(),
            ..CallFilter::default()
        };
        assert_eq!(by_name.apply(&calls, &agents).len(), 3);

        let lowercase_number = CallFilter {
            search: "abc".to_string(),
            ..CallFilter::default()
        };
        assert!(lowercase_number.apply(&calls, &agents).is_empty());
    }

    #[test]
    fn criteria_are_conjunctive() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let agents = vec![agent(a, "Alpha"), agent(b, "Beta")];
        let calls = vec![
            call(a, "100", "200", "completed"),
            call(b, "100", "200", "completed"),
            call(a, "100", "200", "failed"),
        ];
        let filter = CallFilter {
            search: String::new(),
            status: Selection::Only(CallStatus::from("completed")),
            agent: Selection::Only(a),
        };
        let visible = filter.apply(&calls, &agents);
        assert_eq!(visible.len(), 1);
        assert!(std::ptr::eq(visible[0], &calls[0]));
    }

    #[test]
    fn clear_resets_every_criterion() {
        let mut filter = CallFilter {
            search: "415".to_string(),
            status: Selection::Only(CallStatus::from("failed")),
            agent: Selection::Only(Uuid::new_v4()),
        };
        assert!(filter.is_active());
        filter.clear();
        assert_eq!(filter, CallFilter::default());
        assert!(!filter.is_active());
    }

    #[test]
    fn agent_options_skip_unsaved_agents() {
        let saved = Uuid::new_v4();
        let mut draft = agent(Uuid::new_v4(), "Draft");
        draft.id = None;
        let options = agent_options(&[agent(saved, "Saved"), draft]);
        assert_eq!(options, vec![Selection::All, Selection::Only(saved)]);
    }

    #[test]
    fn cycle_wraps_and_recovers_from_stale_selection() {
        let options = vec![Selection::All, Selection::Only(1), Selection::Only(2)];
        assert_eq!(cycle(&options, &Selection::All), Selection::Only(1));
        assert_eq!(cycle(&options, &Selection::Only(2)), Selection::All);
        assert_eq!(cycle(&options, &Selection::Only(9)), Selection::All);
    }
}
