//! Student storage backends.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use registrar_core::{student_id, Error, Grade, NewStudent, Result, Student, MAX_GRADES};

/// Trait for student storage backends.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Returns all current records. Order is unspecified.
    async fn list(&self) -> Result<Vec<Student>>;

    /// Validates the payload, assigns an id, and inserts a new record.
    ///
    /// Fails with [`Error::Validation`] on missing names or more than
    /// [`MAX_GRADES`] grades, and with [`Error::Conflict`] when the
    /// generated id is already taken. Failures leave the store untouched.
    async fn create(&self, new: NewStudent) -> Result<Student>;

    /// Returns the record for `id`.
    async fn get(&self, id: &str) -> Result<Student>;

    /// Replaces a student's grades wholesale and recomputes the average.
    ///
    /// The previous grades are discarded, never merged or appended.
    async fn update_grades(&self, id: &str, grades: Vec<Grade>) -> Result<Student>;

    /// Removes the record for `id`.
    async fn delete(&self, id: &str) -> Result<()>;
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// In-memory student store.
///
/// All map access goes through a single lock, so concurrent requests see
/// one mutation at a time. State lives for the process lifetime only.
pub struct MemoryStore {
    records: RwLock<HashMap<String, Student>>,
    clock: Clock,
}

impl MemoryStore {
    /// Creates a new empty store using the wall clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Creates a store with an injected clock.
    ///
    /// Record ids embed the creation time, so tests pin the clock to get
    /// deterministic ids and to exercise the id-collision path.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            records: RwLock::new(HashMap::new()),
            clock: Box::new(clock),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Student>> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn create(&self, new: NewStudent) -> Result<Student> {
        if new.names.is_empty() || new.last_names.is_empty() {
            return Err(Error::validation("names and lastNames are required"));
        }
        if new.grades.len() > MAX_GRADES {
            return Err(Error::validation("you must provide 4 grades max"));
        }

        let id = student_id(&new.names, &new.last_names, (self.clock)());

        let mut records = self.records.write();
        if records.contains_key(&id) {
            return Err(Error::conflict(id));
        }

        let student = Student::new(id.clone(), new.names, new.last_names, new.grades);
        records.insert(id, student.clone());
        Ok(student)
    }

    async fn get(&self, id: &str) -> Result<Student> {
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::not_found(id))
    }

    async fn update_grades(&self, id: &str, grades: Vec<Grade>) -> Result<Student> {
        let mut records = self.records.write();
        let student = records.get_mut(id).ok_or_else(|| Error::not_found(id))?;

        if grades.len() > MAX_GRADES {
            return Err(Error::validation("you must provide 4 grades max"));
        }

        student.set_grades(grades);
        Ok(student.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        match self.records.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(Error::not_found(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_clock_store() -> MemoryStore {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap();
        MemoryStore::with_clock(move || now)
    }

    fn grades(values: &[f64]) -> Vec<Grade> {
        values.iter().copied().map(Grade::new).collect()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new("Ana", "Lopez", grades(&[80.0, 90.0])))
            .await
            .unwrap();

        assert!((created.grade_average - 85.0).abs() < f64::EPSILON);

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);

        // Repeated reads without writes return identical data.
        let again = store.get(&created.id).await.unwrap();
        assert_eq!(again, fetched);
    }

    #[tokio::test]
    async fn test_list_returns_all_records() {
        let store = MemoryStore::new();
        assert!(store.list().await.unwrap().is_empty());

        store
            .create(NewStudent::new("Ana", "Lopez", vec![]))
            .await
            .unwrap();
        store
            .create(NewStudent::new("Blas", "Marin", vec![]))
            .await
            .unwrap();

        assert_eq!(store.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_requires_names() {
        let store = MemoryStore::new();
        let err = store
            .create(NewStudent::new("", "Lopez", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "names and lastNames are required");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_five_grades() {
        let store = MemoryStore::new();
        let err = store
            .create(NewStudent::new(
                "Ana",
                "Lopez",
                grades(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            ))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "you must provide 4 grades max");
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_exactly_four_grades() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new(
                "Ana",
                "Lopez",
                grades(&[60.0, 70.0, 80.0, 90.0]),
            ))
            .await
            .unwrap();
        assert_eq!(created.grades.len(), 4);
        assert!((created.grade_average - 75.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_create_with_no_grades_has_zero_average() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new("Ana", "Lopez", vec![]))
            .await
            .unwrap();
        assert!(created.grades.is_empty());
        assert!((created.grade_average - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_create_rejects_id_collision() {
        // Same names under a pinned clock generate the same id.
        let store = fixed_clock_store();
        store
            .create(NewStudent::new("Ana", "Lopez", vec![]))
            .await
            .unwrap();
        let err = store
            .create(NewStudent::new("Ana", "Lopez", vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Conflict { .. }));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_grades_wholesale() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new("Ana", "Lopez", grades(&[80.0, 90.0])))
            .await
            .unwrap();

        let updated = store
            .update_grades(&created.id, grades(&[70.0]))
            .await
            .unwrap();
        assert_eq!(updated.grades, grades(&[70.0]));
        assert!((updated.grade_average - 70.0).abs() < f64::EPSILON);

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, updated);
    }

    #[tokio::test]
    async fn test_update_rejects_five_grades() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new("Ana", "Lopez", grades(&[80.0])))
            .await
            .unwrap();

        let err = store
            .update_grades(&created.id, grades(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        // The record is unchanged.
        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        // Absence wins over the length check.
        let err = store
            .update_grades("missing", grades(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let created = store
            .create(NewStudent::new("Ana", "Lopez", vec![]))
            .await
            .unwrap();

        store.delete(&created.id).await.unwrap();
        let err = store.get(&created.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
