use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Specialisation {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}
