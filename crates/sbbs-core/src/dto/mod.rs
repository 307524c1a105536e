//! Wire contract of the board REST API

mod envelope;
mod mappers;
mod requests;
mod responses;

pub use envelope::{Ack, Envelope};
pub use requests::{
    CommentsQuery, CreateCommentRequest, LoginRequest, PostListQuery, MAX_CONTENT_LENGTH,
};
pub use responses::{
    CommentDto, CommentLocationDto, CommentPageDto, LoginResponseDto, PostDetailDto, PostDto,
    PostListDto, PostListItemDto, UserDto,
};
