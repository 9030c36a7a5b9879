pub mod view;

use std::collections::BTreeMap;

use iced::Element;
use tracing::debug;
use uuid::Uuid;

/// A single row of the todo list.
///
/// The id only keys the row's widget; a task has no identity beyond its
/// position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: Uuid,
    text: String,
}

impl Task {
    pub fn new(text: impl Into<String>) -> Self {
        Task {
            id: Uuid::new_v4(),
            text: text.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_input_id(i: usize) -> iced::widget::Id {
        iced::widget::Id::from(format!("task-{i}"))
    }
}

/// Working copy of a row while it is in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub draft: String,
}

#[derive(Debug, Clone)]
pub enum TaskMessage {
    Edit,
    DraftEdited(String),
    FinishEdition,
    CancelEdition,
    Delete,
}

/// In-memory task list with positional edit state and the new-task input
/// buffer.
///
/// Edit state is keyed by row position, not by task: removing a row in front
/// of a row being edited leaves the edit flag at the same index, which now
/// holds the next task.
#[derive(Debug, Default, Clone)]
pub struct TaskList {
    tasks: Vec<Task>,
    edits: BTreeMap<usize, EditState>,
    input: String,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Row texts in display order.
    pub fn texts(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::text).collect()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    /// Appends `text` unless it is empty. Whitespace-only text is kept.
    pub fn add_task(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        self.tasks.push(Task::new(text));
        debug!(len = self.tasks.len(), "task added");
        true
    }

    /// Adds the input buffer as a new task and clears the buffer on success.
    pub fn submit_input(&mut self) -> bool {
        let text = std::mem::take(&mut self.input);
        if self.add_task(&text) {
            true
        } else {
            self.input = text;
            false
        }
    }

    pub fn remove_task(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            debug!(index, len = self.tasks.len(), "ignoring removal out of bounds");
            return None;
        }

        let removed = self.tasks.remove(index);
        self.edits.remove(&index);
        let len = self.tasks.len();
        self.edits.retain(|&position, _| position < len);

        debug!(index, len, "task removed");
        Some(removed)
    }

    pub fn begin_edit(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get(index) else {
            return false;
        };

        self.edits.insert(
            index,
            EditState {
                draft: task.text.clone(),
            },
        );
        true
    }

    pub fn edit_draft(&mut self, index: usize, text: String) {
        if let Some(edit) = self.edits.get_mut(&index) {
            edit.draft = text;
        }
    }

    /// Overwrites the row with `new_text` and leaves edit mode. Empty text is
    /// accepted here. Does nothing unless the row is in edit mode.
    pub fn commit_edit(&mut self, index: usize, new_text: String) -> bool {
        if !self.edits.contains_key(&index) {
            return false;
        }
        let Some(task) = self.tasks.get_mut(index) else {
            self.edits.remove(&index);
            return false;
        };

        task.text = new_text;
        self.edits.remove(&index);
        true
    }

    pub fn commit_draft(&mut self, index: usize) -> bool {
        match self.edits.get(&index) {
            Some(edit) => {
                let draft = edit.draft.clone();
                self.commit_edit(index, draft)
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self, index: usize) {
        self.edits.remove(&index);
    }

    pub fn is_editing(&self, index: usize) -> bool {
        self.edits.contains_key(&index)
    }

    pub fn edit_state(&self, index: usize) -> Option<&EditState> {
        self.edits.get(&index)
    }

    pub fn update(&mut self, index: usize, message: TaskMessage) {
        match message {
            TaskMessage::Edit => {
                self.begin_edit(index);
            }
            TaskMessage::DraftEdited(text) => self.edit_draft(index, text),
            TaskMessage::FinishEdition => {
                self.commit_draft(index);
            }
            TaskMessage::CancelEdition => self.cancel_edit(index),
            TaskMessage::Delete => {
                self.remove_task(index);
            }
        }
    }

    pub fn view(&self, index: usize) -> Option<Element<'_, TaskMessage>> {
        let task = self.tasks.get(index)?;
        Some(view::task_view(task, self.edit_state(index), index))
    }
}
