//! Example: Brute-force Voronoi partition of a canvas

use rust_planar_geometry::*;

fn main() -> Result<()> {
    println!("Voronoi Partition Example");
    println!("=========================\n");

    let config = LabConfigBuilder::new()
        .seed(7)
        .canvas(400, 240)?
        .random_point_count(8)?
        .build()?;
    let mut lab = GeometryLab::new(config);

    let outcome = lab.run(Command::new(Algorithm::Voronoi, PointSource::Random))?;
    if let Outcome::Voronoi {
        sites,
        partition: Some(partition),
    } = outcome
    {
        println!("Canvas {}x{}, {} sites", partition.width(), partition.height(), sites.len());
        for (idx, (site, cells)) in sites.iter().zip(partition.region_sizes()).enumerate() {
            println!("  Site {} at ({}, {}): {} cells", idx, site.x, site.y, cells);
        }
    }

    // Coarse ASCII rendering of a small raster; colors are up to the caller
    let sites = [Point::new(4.0, 3.0), Point::new(30.0, 5.0), Point::new(15.0, 12.0)];
    let partition = RasterPartition::compute(&sites, 40, 16)?;
    println!();
    for y in 0..partition.height() {
        let row: String = (0..partition.width())
            .map(|x| match partition.site_at(x, y) {
                Some(site) => char::from(b'A' + site as u8),
                None => ' ',
            })
            .collect();
        println!("  {}", row);
    }

    // Clicking mode recomputes the whole raster after each site
    let mut voronoi = IncrementalVoronoi::new(40, 16);
    for site in sites {
        let partition = voronoi.add_site(site);
        println!("After {} sites: {:?} cells per site", partition.site_count(), partition.region_sizes());
    }

    Ok(())
}
