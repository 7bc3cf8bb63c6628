use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movies_genres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movies_id: i32,
    pub genres_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movies::Entity",
        from = "Column::MoviesId",
        to = "super::movies::Column::Id",
        on_delete = "Cascade"
    )]
    Movies,
    #[sea_orm(
        belongs_to = "super::genres::Entity",
        from = "Column::GenresId",
        to = "super::genres::Column::Id",
        on_delete = "Cascade"
    )]
    Genres,
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movies.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genres.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
