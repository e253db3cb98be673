// src/controllers/curriculum.rs

//! Staged editing of a course's curriculum (phases → weeks → topics) and instructors.
//!
//! Each level has one staging draft used for both "add" and "edit at index".
//! Committing appends in `Creating` mode and overwrites in `Editing(index)` mode.
//! Removals are immediate.

use crate::{
    controllers::form::DraftMode,
    error::AppError,
    models::{
        course::{CourseForm, Instructor, Phase, Topic, Week},
        tidy, tidy_opt,
    },
};

/// Draft element plus where it goes on commit.
#[derive(Debug, Clone, Default)]
pub struct Staging<T> {
    draft: T,
    mode: DraftMode<usize>,
}

impl<T: Clone + Default> Staging<T> {
    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn mode(&self) -> &DraftMode<usize> {
        &self.mode
    }

    fn begin_add(&mut self) {
        self.draft = T::default();
        self.mode = DraftMode::Creating;
    }

    fn begin_edit(&mut self, index: usize, item: &T) {
        self.draft = item.clone();
        self.mode = DraftMode::Editing(index);
    }

    fn reset(&mut self) {
        self.begin_add();
    }

    fn editing_index(&self) -> Option<usize> {
        match self.mode {
            DraftMode::Editing(idx) => Some(idx),
            DraftMode::Creating => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CurriculumEditor {
    phases: Vec<Phase>,
    instructors: Vec<Instructor>,
    phase: Staging<Phase>,
    week: Staging<Week>,
    /// Phase the week draft belongs to.
    week_phase: Option<usize>,
    instructor: Staging<Instructor>,
    inline_error: Option<String>,
}

impl CurriculumEditor {
    pub fn new(phases: Vec<Phase>, instructors: Vec<Instructor>) -> Self {
        Self {
            phases,
            instructors,
            ..Self::default()
        }
    }

    /// Deep copy of the curriculum currently held by a course draft.
    pub fn from_form(form: &CourseForm) -> Self {
        Self::new(form.curriculum.clone(), form.instructors.clone())
    }

    /// Writes the edited curriculum and instructors back into the course draft.
    pub fn apply_to(&self, form: &mut CourseForm) {
        form.curriculum = self.phases.clone();
        form.instructors = self.instructors.clone();
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    /// Message shown next to the staging form after a rejected commit.
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    // ---- phases ----

    pub fn phase_draft(&self) -> &Staging<Phase> {
        &self.phase
    }

    pub fn phase_draft_mut(&mut self) -> &mut Phase {
        self.phase.draft_mut()
    }

    pub fn begin_add_phase(&mut self) {
        self.inline_error = None;
        self.phase.begin_add();
        self.phase.draft.phase_number = self.next_phase_number();
    }

    pub fn begin_edit_phase(&mut self, index: usize) -> Result<(), AppError> {
        self.inline_error = None;
        let phase = self.phases.get(index).ok_or_else(|| missing("phase", index))?;
        self.phase.begin_edit(index, phase);
        Ok(())
    }

    /// Commits the phase draft. Returns the index it landed at.
    pub fn commit_phase(&mut self) -> Result<usize, AppError> {
        let draft = self.phase.draft().clone();
        let editing = self.phase.editing_index();

        if draft.phase_number == 0 {
            return self.reject("Phase number must be at least 1");
        }
        if draft.title.trim().is_empty() {
            return self.reject("Phase title is required");
        }
        let duplicate = self
            .phases
            .iter()
            .enumerate()
            .any(|(i, p)| Some(i) != editing && p.phase_number == draft.phase_number);
        if duplicate {
            return self.reject(&format!("Phase {} already exists", draft.phase_number));
        }

        let index = match editing {
            Some(idx) if idx < self.phases.len() => {
                let target = &mut self.phases[idx];
                target.phase_number = draft.phase_number;
                target.title = tidy(&draft.title);
                target.description = tidy(&draft.description);
                idx
            }
            Some(idx) => return Err(missing("phase", idx)),
            None => {
                self.phases.push(Phase {
                    title: tidy(&draft.title),
                    description: tidy(&draft.description),
                    ..draft
                });
                self.phases.len() - 1
            }
        };

        tracing::debug!("Committed phase at index {}", index);
        self.inline_error = None;
        self.phase.reset();
        Ok(index)
    }

    pub fn remove_phase(&mut self, index: usize) -> Option<Phase> {
        if index >= self.phases.len() {
            return None;
        }
        let removed = self.phases.remove(index);
        self.phase.reset();
        match self.week_phase {
            Some(p) if p == index => {
                self.week_phase = None;
                self.week.reset();
            }
            Some(p) if p > index => self.week_phase = Some(p - 1),
            _ => {}
        }
        Some(removed)
    }

    fn next_phase_number(&self) -> u32 {
        self.phases.iter().map(|p| p.phase_number).max().unwrap_or(0) + 1
    }

    // ---- weeks ----

    pub fn week_draft(&self) -> &Staging<Week> {
        &self.week
    }

    pub fn week_draft_mut(&mut self) -> &mut Week {
        self.week.draft_mut()
    }

    pub fn begin_add_week(&mut self, phase_index: usize) -> Result<(), AppError> {
        self.inline_error = None;
        let phase = self
            .phases
            .get(phase_index)
            .ok_or_else(|| missing("phase", phase_index))?;
        let next = phase.weeks.iter().map(|w| w.week_number).max().unwrap_or(0) + 1;
        self.week.begin_add();
        self.week.draft.week_number = next;
        self.week_phase = Some(phase_index);
        Ok(())
    }

    pub fn begin_edit_week(&mut self, phase_index: usize, week_index: usize) -> Result<(), AppError> {
        self.inline_error = None;
        let week = self
            .phases
            .get(phase_index)
            .ok_or_else(|| missing("phase", phase_index))?
            .weeks
            .get(week_index)
            .ok_or_else(|| missing("week", week_index))?;
        self.week.begin_edit(week_index, week);
        self.week_phase = Some(phase_index);
        Ok(())
    }

    /// Adds a topic to the week draft.
    pub fn add_topic(&mut self, title: &str, description: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return self.reject("Topic title is required");
        }
        self.inline_error = None;
        self.week.draft.topics.push(Topic {
            title: tidy(title),
            description: tidy(description),
        });
        Ok(())
    }

    /// Removes a topic from the week draft.
    pub fn remove_topic(&mut self, topic_index: usize) -> Option<Topic> {
        let topics = &mut self.week.draft.topics;
        (topic_index < topics.len()).then(|| topics.remove(topic_index))
    }

    /// Commits the week draft into its phase. Returns the week's index.
    pub fn commit_week(&mut self) -> Result<usize, AppError> {
        let Some(phase_index) = self.week_phase else {
            return self.reject("Select a phase before adding weeks");
        };
        if phase_index >= self.phases.len() {
            return Err(missing("phase", phase_index));
        }

        let draft = self.week.draft().clone();
        let editing = self.week.editing_index();

        if draft.week_number == 0 {
            return self.reject("Week number must be at least 1");
        }
        if draft.title.trim().is_empty() {
            return self.reject("Week title is required");
        }
        let duplicate = self.phases[phase_index]
            .weeks
            .iter()
            .enumerate()
            .any(|(i, w)| Some(i) != editing && w.week_number == draft.week_number);
        if duplicate {
            let phase_number = self.phases[phase_index].phase_number;
            return self.reject(&format!(
                "Week {} already exists in phase {}",
                draft.week_number, phase_number
            ));
        }

        let week = Week {
            title: tidy(&draft.title),
            ..draft
        };
        let weeks = &mut self.phases[phase_index].weeks;
        let index = match editing {
            Some(idx) if idx < weeks.len() => {
                weeks[idx] = week;
                idx
            }
            Some(idx) => return Err(missing("week", idx)),
            None => {
                weeks.push(week);
                weeks.len() - 1
            }
        };

        self.inline_error = None;
        self.week.reset();
        self.week_phase = None;
        Ok(index)
    }

    pub fn remove_week(&mut self, phase_index: usize, week_index: usize) -> Option<Week> {
        let weeks = &mut self.phases.get_mut(phase_index)?.weeks;
        if week_index >= weeks.len() {
            return None;
        }
        let removed = weeks.remove(week_index);
        if self.week_phase == Some(phase_index) {
            self.week.reset();
            self.week_phase = None;
        }
        Some(removed)
    }

    /// Removes a topic from a committed week.
    pub fn remove_committed_topic(
        &mut self,
        phase_index: usize,
        week_index: usize,
        topic_index: usize,
    ) -> Option<Topic> {
        let topics = &mut self
            .phases
            .get_mut(phase_index)?
            .weeks
            .get_mut(week_index)?
            .topics;
        (topic_index < topics.len()).then(|| topics.remove(topic_index))
    }

    // ---- instructors ----

    pub fn instructor_draft(&self) -> &Staging<Instructor> {
        &self.instructor
    }

    pub fn instructor_draft_mut(&mut self) -> &mut Instructor {
        self.instructor.draft_mut()
    }

    pub fn begin_add_instructor(&mut self) {
        self.inline_error = None;
        self.instructor.begin_add();
    }

    pub fn begin_edit_instructor(&mut self, index: usize) -> Result<(), AppError> {
        self.inline_error = None;
        let instructor = self
            .instructors
            .get(index)
            .ok_or_else(|| missing("instructor", index))?;
        self.instructor.begin_edit(index, instructor);
        Ok(())
    }

    pub fn commit_instructor(&mut self) -> Result<usize, AppError> {
        let draft = self.instructor.draft().clone();
        if draft.name.trim().is_empty() {
            return self.reject("Instructor name is required");
        }
        let instructor = Instructor {
            name: tidy(&draft.name),
            bio: tidy(&draft.bio),
            experience: tidy(&draft.experience),
            expertise: tidy(&draft.expertise),
            photo_url: tidy_opt(&draft.photo_url),
        };

        let index = match self.instructor.editing_index() {
            Some(idx) if idx < self.instructors.len() => {
                self.instructors[idx] = instructor;
                idx
            }
            Some(idx) => return Err(missing("instructor", idx)),
            None => {
                self.instructors.push(instructor);
                self.instructors.len() - 1
            }
        };

        self.inline_error = None;
        self.instructor.reset();
        Ok(index)
    }

    pub fn remove_instructor(&mut self, index: usize) -> Option<Instructor> {
        if index >= self.instructors.len() {
            return None;
        }
        self.instructor.reset();
        Some(self.instructors.remove(index))
    }

    fn reject<T>(&mut self, message: &str) -> Result<T, AppError> {
        tracing::debug!("Curriculum edit rejected: {}", message);
        self.inline_error = Some(message.to_string());
        Err(AppError::Validation(message.to_string()))
    }
}

fn missing(what: &str, index: usize) -> AppError {
    AppError::Validation(format!("No {what} at position {}", index + 1))
}
