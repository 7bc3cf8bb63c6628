use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movies::Table)
                    .if_not_exists()
                    .col(pk_auto(Movies::Id))
                    .col(string_len(Movies::Title, 120))
                    .col(string_len(Movies::Poster, 120))
                    .col(text(Movies::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(pk_auto(Genres::Id))
                    .col(string_len(Genres::Name, 80))
                    .to_owned(),
            )
            .await?;

        // Junction rows are not unique per pair; a movie may carry a genre twice.
        manager
            .create_table(
                Table::create()
                    .table(MoviesGenres::Table)
                    .if_not_exists()
                    .col(pk_auto(MoviesGenres::Id))
                    .col(integer(MoviesGenres::MoviesId))
                    .col(integer(MoviesGenres::GenresId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_genres_movies_id")
                            .from(MoviesGenres::Table, MoviesGenres::MoviesId)
                            .to(Movies::Table, Movies::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movies_genres_genres_id")
                            .from(MoviesGenres::Table, MoviesGenres::GenresId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_genres_movies_id")
                    .table(MoviesGenres::Table)
                    .col(MoviesGenres::MoviesId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MoviesGenres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Genres::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Movies::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Id,
    Title,
    Poster,
    Description,
}

#[derive(DeriveIden)]
enum Genres {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum MoviesGenres {
    Table,
    Id,
    MoviesId,
    GenresId,
}
