use sea_orm_migration::prelude::*;

/// Seeded in id order; the first entry receives id 1.
const GENRES: &[&str] = &[
    "Adventure",
    "Animated",
    "Biographical",
    "Comedy",
    "Disaster",
    "Drama",
    "Epic",
    "Fantasy",
    "Musical",
    "Romantic",
    "Science Fiction",
    "Space-Opera",
    "Superhero",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert =
            Query::insert().into_table(Genres::Table).columns([Genres::Name]).to_owned();
        for name in GENRES {
            insert.values_panic([(*name).into()]);
        }
        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Genres::Table)
            .and_where(Expr::col(Genres::Name).is_in(GENRES.iter().copied()))
            .to_owned();
        manager.exec_stmt(delete).await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Name,
}
