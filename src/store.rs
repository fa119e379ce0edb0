// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory record store for classes and students.
//!
//! Records keep insertion order, which is the order pages are cut from.
//! The store knows nothing about authentication; handlers reach it only
//! after the gateway has admitted the request.

use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{ClassRecord, Student, StudentPage};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    classes: Vec<ClassRecord>,
    students: Vec<Student>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Classes ==========

    pub fn list_classes(&self) -> Vec<ClassRecord> {
        self.classes.clone()
    }

    pub fn insert_class(&mut self, fullname: impl Into<String>) -> ClassRecord {
        let class = ClassRecord {
            class_id: Uuid::new_v4(),
            fullname: fullname.into(),
        };
        self.classes.push(class.clone());
        class
    }

    pub fn class_exists(&self, class_id: &Uuid) -> bool {
        self.classes.iter().any(|c| &c.class_id == class_id)
    }

    // ========== Students ==========

    /// One page of students, optionally restricted to a class.
    ///
    /// The filtered set is counted, the page is cut from it in insertion
    /// order, and only then is the page ordered by last name (ignoring case).
    /// `page` and `page_size` must be at least 1.
    pub fn list_students(
        &self,
        page: usize,
        page_size: usize,
        class_id: Option<Uuid>,
    ) -> StudentPage {
        let filtered: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| class_id.map_or(true, |id| s.class_id == id))
            .collect();

        let total_items = filtered.len();
        let skip = page.saturating_sub(1).saturating_mul(page_size);

        let mut data: Vec<Student> = filtered
            .into_iter()
            .skip(skip)
            .take(page_size)
            .cloned()
            .collect();
        data.sort_by_cached_key(|s| s.last_name.to_lowercase());

        StudentPage {
            total_items,
            total_pages: total_items.div_ceil(page_size.max(1)),
            current_page: page,
            page_size,
            data,
        }
    }

    pub fn get_student(&self, student_id: &Uuid) -> Option<Student> {
        self.students
            .iter()
            .find(|s| &s.student_id == student_id)
            .cloned()
    }

    pub fn insert_student(&mut self, student: Student) -> Uuid {
        let id = student.student_id;
        self.students.push(student);
        id
    }

    pub fn update_student(&mut self, student: Student) -> Result<(), ApiError> {
        let slot = self
            .students
            .iter_mut()
            .find(|s| s.student_id == student.student_id)
            .ok_or_else(|| ApiError::not_found("Student not found"))?;
        *slot = student;
        Ok(())
    }

    pub fn delete_student(&mut self, student_id: &Uuid) -> Result<(), ApiError> {
        let index = self
            .students
            .iter()
            .position(|s| &s.student_id == student_id)
            .ok_or_else(|| ApiError::not_found("Student not found"))?;
        self.students.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn student(last_name: &str, class_id: Uuid) -> Student {
        Student {
            student_id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            last_name: last_name.to_string(),
            class_id,
            gender: 1,
            day_of_birth: None,
            avatar: String::new(),
        }
    }

    #[test]
    fn classes_round_trip() {
        let mut store = InMemoryStore::new();
        let class = store.insert_class("10A1");
        assert!(store.class_exists(&class.class_id));
        assert!(!store.class_exists(&Uuid::new_v4()));
        assert_eq!(store.list_classes(), vec![class]);
    }

    #[test]
    fn pages_are_cut_before_sorting() {
        let mut store = InMemoryStore::new();
        let class = store.insert_class("10A1").class_id;
        for name in ["Tran", "Le", "Nguyen", "an", "Bui"] {
            store.insert_student(student(name, class));
        }

        let first = store.list_students(1, 3, None);
        assert_eq!(first.total_items, 5);
        assert_eq!(first.total_pages, 2);
        let names: Vec<_> = first.data.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["Le", "Nguyen", "Tran"]);

        let second = store.list_students(2, 3, None);
        let names: Vec<_> = second.data.iter().map(|s| s.last_name.as_str()).collect();
        assert_eq!(names, vec!["an", "Bui"]);
        assert_eq!(second.current_page, 2);
    }

    #[test]
    fn class_filter_applies_before_counting() {
        let mut store = InMemoryStore::new();
        let a = store.insert_class("A").class_id;
        let b = store.insert_class("B").class_id;
        store.insert_student(student("One", a));
        store.insert_student(student("Two", b));
        store.insert_student(student("Three", a));

        let page = store.list_students(1, 45, Some(a));
        assert_eq!(page.total_items, 2);
        assert!(page.data.iter().all(|s| s.class_id == a));
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let mut store = InMemoryStore::new();
        let class = store.insert_class("A").class_id;
        store.insert_student(student("Only", class));
        let page = store.list_students(5, 10, None);
        assert!(page.data.is_empty());
        assert_eq!(page.total_items, 1);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn update_and_delete_report_missing_students() {
        let mut store = InMemoryStore::new();
        let class = store.insert_class("A").class_id;
        let mut stored = student("Pham", class);
        let id = store.insert_student(stored.clone());

        stored.first_name = "Changed".to_string();
        store.update_student(stored).unwrap();
        assert_eq!(store.get_student(&id).unwrap().first_name, "Changed");

        store.delete_student(&id).unwrap();
        assert!(store.get_student(&id).is_none());

        let err = store.delete_student(&id).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let err = store.update_student(student("Ghost", class)).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
