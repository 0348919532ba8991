use shared::domain::{Image, ImageDraft, ImageId};
use tracing::info;

use super::{fetch_error, write_error, AlbumWorkflow};
use crate::{
    error::{Operation, WorkflowError},
    repository::RepositoryError,
};

impl AlbumWorkflow {
    /// Adds `draft` to the album called `album_name` and returns the stored image.
    pub async fn add_image(
        &mut self,
        album_name: &str,
        draft: ImageDraft,
    ) -> Result<Image, WorkflowError> {
        let Some(draft) = draft.trimmed() else {
            return Err(self.fail(WorkflowError::Validation(
                "Title and URL are required.".to_string(),
            )));
        };

        self.set_busy(true);
        let result = self.add_image_inner(album_name, draft).await;
        self.set_busy(false);
        self.finish(Operation::AddImage, result)
    }

    async fn add_image_inner(
        &mut self,
        album_name: &str,
        draft: ImageDraft,
    ) -> Result<Image, WorkflowError> {
        let op = Operation::AddImage;
        let album_id = self.resolve_album_id(op, album_name).await?;

        let fresh = self
            .repo
            .list_albums()
            .await
            .map_err(|err| fetch_error(op, err))?;
        let album = fresh
            .iter()
            .find(|album| album.id == album_id)
            .ok_or_else(|| WorkflowError::NotFound {
                op,
                name: album_name.to_string(),
            })?;

        let image_id = self.policy.next_id(&album.images).ok_or_else(|| {
            WorkflowError::Validation("This album has no image ids left.".to_string())
        })?;
        let image = Image::from_draft(image_id, draft);
        let written = self
            .repo
            .add_image(&album_id, image.clone())
            .await
            .map_err(|err| mutation_error(op, album_name, err))?;

        info!(album = album_name, image_id = %image.id, "image added");
        self.merge_images(&album_id, written);
        Ok(image)
    }

    /// Replaces title and url of the image with `image.id`.
    pub async fn update_image(
        &mut self,
        album_name: &str,
        image: Image,
    ) -> Result<(), WorkflowError> {
        self.set_busy(true);
        let result = self.update_image_inner(album_name, image.trimmed()).await;
        self.set_busy(false);
        self.finish(Operation::UpdateImage, result)
    }

    async fn update_image_inner(
        &mut self,
        album_name: &str,
        image: Image,
    ) -> Result<(), WorkflowError> {
        let op = Operation::UpdateImage;
        let album_id = self.resolve_album_id(op, album_name).await?;
        let image_id = image.id;
        let written = self
            .repo
            .replace_image(&album_id, image)
            .await
            .map_err(|err| mutation_error(op, album_name, err))?;

        info!(album = album_name, %image_id, "image updated");
        self.merge_images(&album_id, written);
        Ok(())
    }

    /// Removes the image with `image_id`. Remaining ids are left as they are.
    pub async fn delete_image(
        &mut self,
        album_name: &str,
        image_id: ImageId,
    ) -> Result<(), WorkflowError> {
        self.set_busy(true);
        let result = self.delete_image_inner(album_name, image_id).await;
        self.set_busy(false);
        self.finish(Operation::DeleteImage, result)
    }

    async fn delete_image_inner(
        &mut self,
        album_name: &str,
        image_id: ImageId,
    ) -> Result<(), WorkflowError> {
        let op = Operation::DeleteImage;
        let album_id = self.resolve_album_id(op, album_name).await?;
        let written = self
            .repo
            .remove_image(&album_id, image_id)
            .await
            .map_err(|err| mutation_error(op, album_name, err))?;

        info!(album = album_name, %image_id, "image deleted");
        self.merge_images(&album_id, written);
        Ok(())
    }

    fn finish<T>(
        &self,
        op: Operation,
        result: Result<T, WorkflowError>,
    ) -> Result<T, WorkflowError> {
        match result {
            Ok(value) => {
                self.succeed(op);
                Ok(value)
            }
            Err(err) => Err(self.fail(err)),
        }
    }
}

// Store failures while mutating are reported as write failures.
fn mutation_error(op: Operation, album_name: &str, err: RepositoryError) -> WorkflowError {
    match err {
        RepositoryError::AlbumMissing(_) => WorkflowError::NotFound {
            op,
            name: album_name.to_string(),
        },
        RepositoryError::ImageMissing { image_id, .. } => WorkflowError::ImageNotFound {
            op,
            album: album_name.to_string(),
            image_id,
        },
        other => write_error(op, other),
    }
}
