use crate::models::{Subtask, SubtaskInput};

/// Reconciles an incoming checklist against the stored one.
///
/// Items carrying the id of an existing entry update it in place: the text
/// is replaced only when the incoming text is present and non-empty, the
/// done flag only when explicitly sent. Ids that match nothing are ignored.
/// Items without an id are appended in incoming order; their ids are
/// assigned by the store on save. Entries not mentioned in `incoming` are
/// left untouched; removal goes through the delete-subtask operation,
/// never through a merge.
pub fn merge_checklist(existing: &mut Vec<Subtask>, incoming: Vec<SubtaskInput>) {
    for item in incoming {
        match item.id {
            Some(id) => {
                if let Some(entry) = existing.iter_mut().find(|s| s.id == Some(id)) {
                    if let Some(text) = item.subtask {
                        if !text.is_empty() {
                            entry.subtask = text;
                        }
                    }
                    if let Some(done) = item.done {
                        entry.done = done;
                    }
                }
            }
            None => existing.push(Subtask {
                id: None,
                subtask: item.subtask.unwrap_or_default(),
                done: item.done.unwrap_or(false),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn stored(id: Uuid, text: &str, done: bool) -> Subtask {
        Subtask {
            id: Some(id),
            subtask: text.to_string(),
            done,
        }
    }

    #[test]
    fn test_done_update_preserves_text() {
        let id = Uuid::new_v4();
        let mut checklist = vec![stored(id, "write the report", false)];

        merge_checklist(
            &mut checklist,
            vec![SubtaskInput {
                id: Some(id),
                subtask: None,
                done: Some(true),
            }],
        );

        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist[0].subtask, "write the report");
        assert!(checklist[0].done);
    }

    #[test]
    fn test_empty_text_is_ignored() {
        let id = Uuid::new_v4();
        let mut checklist = vec![stored(id, "original", false)];

        merge_checklist(
            &mut checklist,
            vec![SubtaskInput {
                id: Some(id),
                subtask: Some("".to_string()),
                done: None,
            }],
        );

        assert_eq!(checklist[0].subtask, "original");
        assert!(!checklist[0].done);
    }

    #[test]
    fn test_stale_id_is_silently_skipped() {
        let id = Uuid::new_v4();
        let mut checklist = vec![stored(id, "kept", false)];

        merge_checklist(
            &mut checklist,
            vec![SubtaskInput {
                id: Some(Uuid::new_v4()),
                subtask: Some("from another task".to_string()),
                done: Some(true),
            }],
        );

        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist[0].subtask, "kept");
    }

    #[test]
    fn test_new_items_are_appended_in_order() {
        let id = Uuid::new_v4();
        let mut checklist = vec![stored(id, "first", true)];

        merge_checklist(
            &mut checklist,
            vec![
                SubtaskInput {
                    id: None,
                    subtask: Some("second".to_string()),
                    done: None,
                },
                SubtaskInput {
                    id: None,
                    subtask: Some("third".to_string()),
                    done: Some(true),
                },
            ],
        );

        assert_eq!(checklist.len(), 3);
        assert_eq!(checklist[1].subtask, "second");
        assert!(checklist[1].id.is_none());
        assert!(!checklist[1].done);
        assert_eq!(checklist[2].subtask, "third");
        assert!(checklist[2].done);
    }

    #[test]
    fn test_unmentioned_entries_are_retained() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut checklist = vec![stored(a, "a", false), stored(b, "b", true)];

        merge_checklist(
            &mut checklist,
            vec![SubtaskInput {
                id: Some(b),
                subtask: Some("b updated".to_string()),
                done: None,
            }],
        );

        assert_eq!(checklist.len(), 2);
        assert_eq!(checklist[0].subtask, "a");
        assert_eq!(checklist[1].subtask, "b updated");
        assert!(checklist[1].done);
    }

    #[test]
    fn test_empty_incoming_is_a_noop() {
        let id = Uuid::new_v4();
        let mut checklist = vec![stored(id, "untouched", false)];
        merge_checklist(&mut checklist, vec![]);
        assert_eq!(checklist, vec![stored(id, "untouched", false)]);
    }

    #[test]
    fn test_merge_is_idempotent_once_ids_are_assigned() {
        let existing_id = Uuid::new_v4();
        let mut checklist = vec![stored(existing_id, "existing", false)];

        merge_checklist(
            &mut checklist,
            vec![
                SubtaskInput {
                    id: Some(existing_id),
                    subtask: Some("existing renamed".to_string()),
                    done: Some(true),
                },
                SubtaskInput {
                    id: None,
                    subtask: Some("appended".to_string()),
                    done: None,
                },
            ],
        );
        assert_eq!(checklist.len(), 2);

        // the store assigns identities on save
        let appended_id = Uuid::new_v4();
        checklist[1].id = Some(appended_id);

        // the client resends the same array, identities now present
        let resend = vec![
            SubtaskInput {
                id: Some(existing_id),
                subtask: Some("existing renamed".to_string()),
                done: Some(true),
            },
            SubtaskInput {
                id: Some(appended_id),
                subtask: Some("appended".to_string()),
                done: None,
            },
        ];
        let before = checklist.clone();
        merge_checklist(&mut checklist, resend);

        assert_eq!(checklist, before, "a replayed merge must not duplicate items");
    }
}
