//! Extended entity types owned by other subgraphs
//!
//! Programs, users, groups, facilities and states live in sibling
//! subgraphs; this service only extends them with the back-reference
//! fields it can answer. Each type carries nothing but the external key,
//! so constructing one is free and never touches the database.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;

use super::admission::Admission;
use super::exam::Exam;
use super::student_admission::StudentAdmission;

/// Academic program owned by the programs subgraph
pub struct Program {
    pub id: Uuid,
}

#[Object(extends)]
impl Program {
    #[graphql(external)]
    async fn id(&self) -> Uuid {
        self.id
    }

    /// Admissions admitting into this program
    async fn admissions(&self, ctx: &Context<'_>) -> Result<Vec<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .admissions
            .related("program_id", Some(self.id))
            .await?;
        Ok(rows.into_iter().map(Admission::from).collect())
    }
}

/// User owned by the identity subgraph
pub struct User {
    pub id: Uuid,
}

#[Object(extends)]
impl User {
    #[graphql(external)]
    async fn id(&self) -> Uuid {
        self.id
    }

    /// Applications this user submitted
    async fn student_admissions(&self, ctx: &Context<'_>) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .student_admissions
            .related("student_id", Some(self.id))
            .await?;
        Ok(rows.into_iter().map(StudentAdmission::from).collect())
    }
}

/// Group owned by the identity subgraph; exams reference one as the
/// examiner board
pub struct Group {
    pub id: Uuid,
}

#[Object(extends)]
impl Group {
    #[graphql(external)]
    async fn id(&self) -> Uuid {
        self.id
    }

    /// Exams this group examines
    async fn exams(&self, ctx: &Context<'_>) -> Result<Vec<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders.exams.related("examiners_id", Some(self.id)).await?;
        Ok(rows.into_iter().map(Exam::from).collect())
    }
}

/// Facility owned by the facilities subgraph
pub struct Facility {
    pub id: Uuid,
}

#[Object(extends)]
impl Facility {
    #[graphql(external)]
    async fn id(&self) -> Uuid {
        self.id
    }

    /// Exams taking place in this facility
    async fn exams(&self, ctx: &Context<'_>) -> Result<Vec<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders.exams.related("facility_id", Some(self.id)).await?;
        Ok(rows.into_iter().map(Exam::from).collect())
    }
}

/// Workflow state owned by the state-machine subgraph
pub struct State {
    pub id: Uuid,
}

#[Object(extends)]
impl State {
    #[graphql(external)]
    async fn id(&self) -> Uuid {
        self.id
    }

    /// Applications currently in this state
    async fn student_admissions(&self, ctx: &Context<'_>) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .student_admissions
            .related("state_id", Some(self.id))
            .await?;
        Ok(rows.into_iter().map(StudentAdmission::from).collect())
    }
}
